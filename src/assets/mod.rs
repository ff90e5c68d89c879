//! Sprite assets
//!
//! The snake and food sprites are PNG files loaded once at startup. The
//! terminal renderer paints whole cells, so each sprite is reduced to the
//! mean colour of its visible pixels.

pub mod sprite;

pub use sprite::{AssetError, FOOD_SPRITE, SNAKE_SPRITE, Sprite, Sprites};
