//! Gravity clock.
//!
//! Pure bookkeeping for the tick timer: the interval for the current level,
//! whether gravity is running, and the elapsed time not yet turned into
//! ticks. The tokio driver uses it to decide when its interval must be
//! rebuilt. Hosts with their own frame loop can feed it elapsed time directly
//! through [`GravityClock::advance`].

use mini_tetris_core::drop_speed_ms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityClock {
    level: u32,
    interval_ms: u32,
    accumulated_ms: u64,
    paused: bool,
}

impl GravityClock {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            interval_ms: drop_speed_ms(level),
            accumulated_ms: 0,
            paused: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_running(&self) -> bool {
        !self.paused
    }

    /// Switch to the interval for `level`. Returns true if the interval changed.
    ///
    /// Time already accumulated carries over but is capped below one new
    /// interval, so speeding up never fires a burst of ticks.
    pub fn set_level(&mut self, level: u32) -> bool {
        self.level = level;
        let interval = drop_speed_ms(level);
        if interval == self.interval_ms {
            return false;
        }
        self.interval_ms = interval;
        self.accumulated_ms = self.accumulated_ms.min(interval as u64 - 1);
        true
    }

    /// Add elapsed time and return how many ticks are now due.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        if self.paused {
            return 0;
        }
        let interval = self.interval_ms.max(1) as u64;
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        let due = self.accumulated_ms / interval;
        self.accumulated_ms %= interval;
        due.min(u32::MAX as u64) as u32
    }

    /// Milliseconds until the next tick is due.
    pub fn remaining_ms(&self) -> u64 {
        (self.interval_ms as u64).saturating_sub(self.accumulated_ms)
    }

    /// Stop accumulating time. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        let was_running = !self.paused;
        self.paused = true;
        was_running
    }

    /// Start again from a fresh baseline; time spent paused never turns into ticks.
    /// Returns false if the clock was not paused.
    pub fn resume(&mut self) -> bool {
        let was_paused = self.paused;
        self.paused = false;
        self.accumulated_ms = 0;
        was_paused
    }

    /// Drop accumulated time without changing the interval.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(1)
    }
}
