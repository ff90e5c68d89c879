//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front-end drives it through [`GameEngine::advance`] and
//! [`GameState::set_heading`] and only reads [`GameState`] to draw.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GRID_HEIGHT, GRID_WIDTH, GameConfig, MOVES_PER_SECOND, SpawnArea};
pub use engine::{GameEngine, StepResult};
pub use state::{CollisionType, GameOutcome, GameState, GameStatus, Position, Snake};
