//! Minimal stderr logger behind the `log` facade.
//!
//! The library logs per-path skip warnings through `log`; the CLI installs
//! this logger so they reach the user. Level comes from `FSCOUT_LOG`
//! (default: warn).

use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level filter.
pub const LOG_LEVEL_ENV: &str = "FSCOUT_LOG";

struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "fscout: {}: {}",
                record.level().to_string().to_lowercase(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Install the stderr logger. Safe to call once per process.
pub fn init() -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

    let level = level_from_env();
    let logger = LOGGER.get_or_init(|| StderrLogger { level });
    log::set_logger(logger)?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}
