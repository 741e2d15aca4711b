//! Mini Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so hosts, integration tests
//! and benches can use `mini_tetris::{core,driver,input,types}`.

pub use mini_tetris_core as core;
pub use mini_tetris_driver as driver;
pub use mini_tetris_input as input;
pub use mini_tetris_types as types;
