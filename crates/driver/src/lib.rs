//! Real-time driver.
//!
//! Turns the pure reducer in `mini-tetris-core` into a running game:
//!
//! - [`clock`]: gravity interval bookkeeping per level, pause and resume
//! - [`config`]: environment-driven settings
//! - [`protocol`]: line-delimited JSON spoken with the host
//! - [`runtime`]: the tokio task that serializes input and gravity into the
//!   reducer and reports snapshots
//!
//! ```no_run
//! use mini_tetris_driver::{Driver, DriverConfig};
//!
//! # async fn demo() {
//! let (driver, tx) = Driver::new(DriverConfig::from_env());
//! tokio::spawn(driver.run(|snapshot| println!("score {}", snapshot.score)));
//! # drop(tx);
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod protocol;
pub mod runtime;

pub use mini_tetris_types as types;

pub use clock::GravityClock;
pub use config::DriverConfig;
pub use protocol::{encode, parse_bytes, parse_line, HostEvent, LineError, OutboundMessage};
pub use runtime::{spawn_line_reader, Driver};
