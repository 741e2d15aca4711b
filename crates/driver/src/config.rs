//! Driver configuration from environment variables.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;
use mini_tetris_input::GestureConfig;

/// Driver configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Seed for the first bag.
    pub seed: u32,
    /// Touch thresholds and the delay between decomposed swipe steps.
    pub gesture: GestureConfig,
    /// Capacity of the host event channel.
    pub max_pending: usize,
    /// Never fire `Tick`; pieces only fall on explicit input.
    pub disable_gravity: bool,
    pub log_level: LevelFilter,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            gesture: GestureConfig::default(),
            max_pending: 64,
            disable_gravity: false,
            log_level: LevelFilter::Warn,
        }
    }
}

impl DriverConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seed = parsed(&lookup, "MINI_TETRIS_SEED").unwrap_or(defaults.seed);

        let gesture = GestureConfig {
            step_ms: parsed(&lookup, "MINI_TETRIS_GESTURE_STEP_MS")
                .unwrap_or(defaults.gesture.step_ms),
            cell_px: parsed(&lookup, "MINI_TETRIS_CELL_PX")
                .filter(|px: &f32| *px > 0.0)
                .unwrap_or(defaults.gesture.cell_px),
            ..defaults.gesture
        };

        let max_pending = parsed(&lookup, "MINI_TETRIS_MAX_PENDING")
            .unwrap_or(defaults.max_pending)
            .max(1);

        let disable_gravity = lookup("MINI_TETRIS_DISABLE_GRAVITY")
            .map(|s| parse_flag(&s))
            .unwrap_or(defaults.disable_gravity);

        let log_level = parsed(&lookup, "MINI_TETRIS_LOG").unwrap_or(defaults.log_level);

        Self {
            seed,
            gesture,
            max_pending,
            disable_gravity,
            log_level,
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Seed derived from the wall clock.
pub fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
