//! TUI Snake - classic single-player Snake in the terminal
//!
//! This library provides:
//! - Core game logic (game module), independent of any I/O
//! - Sprite loading (assets module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod assets;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
