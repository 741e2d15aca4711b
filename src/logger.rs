//! Minimal stderr logger for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `[LEVEL target] message` lines to stderr.
pub struct StderrLogger {
    level: LevelFilter,
    /// `"\r\n"` while the terminal is in raw mode.
    line_end: &'static str,
}

impl StderrLogger {
    /// Install as the global logger.
    pub fn init(level: LevelFilter, line_end: &'static str) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self { level, line_end }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprint!(
                "[{} {}] {}{}",
                record.level(),
                record.target(),
                record.args(),
                self.line_end
            );
        }
    }

    fn flush(&self) {}
}
