//! Input adapters (engine-facing).
//!
//! This crate is intentionally independent of the game state. It translates
//! raw input into [`crate::types::GameAction`]s:
//!
//! - [`map`]: `crossterm` key events, one action per key press
//! - [`gesture`]: touch start/end pairs, one gesture to one or more actions
//!   with dispatch delays

pub mod gesture;
pub mod map;

pub use mini_tetris_types as types;

pub use gesture::{classify, Gesture, GestureConfig, GesturePlan, ScheduledAction, TouchTracker};
pub use map::{handle_key_event, should_quit};
