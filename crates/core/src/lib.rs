//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has **no
//! dependencies** on timers, terminals, or I/O, which makes it:
//!
//! - **Deterministic**: the same seed and the same action sequence always
//!   produce the same game
//! - **Total**: every action either applies completely or is a silent no-op;
//!   nothing here returns an error
//! - **Portable**: the driver, tests, and benches all run the same reducer
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision detection and line clearing
//! - [`game_state`]: the reducer; active piece, hold, queue, score, lifecycle
//! - [`pieces`]: tetromino shapes, spawning, rotation with horizontal kicks
//! - [`rng`]: seeded 7-bag piece generation
//! - [`scoring`]: line bonuses, drop points, levels, gravity intervals
//! - [`snapshot`]: serializable read-only view for hosts
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: each run of seven pieces holds every kind once
//! - **Rotation**: clockwise only; a blocked rotation retries shifted by
//!   -1, +1, -2, +2 columns and is dropped if all of those collide
//! - **No lock delay**: a piece locks on the first gravity step that cannot move it
//! - **Ghost Piece**: [`GameState::ghost_y`] gives the hard-drop landing row
//! - **Hold**: once per piece; re-enabled when the next piece locks
//! - **Game over**: the next piece cannot spawn, or a lock leaves cells in the
//!   top two rows
//!
//! # Example
//!
//! ```
//! use mini_tetris_core::GameState;
//! use mini_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The core has no clock. The host applies [`GameAction::Tick`](types::GameAction::Tick)
//! every [`GameState::drop_interval_ms`] milliseconds; see the driver crate.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use mini_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GamePhase, GameState};
pub use pieces::{get_shape, hard_drop_target, try_rotate, Tetromino};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_level, calculate_score, drop_score, drop_speed_ms, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
