//! Logging Infrastructure
//!
//! Console output by default. With a log directory the output goes to a
//! daily rolling file `cutwork.YYYY-MM-DD` instead, keeping the newest
//! `keep_files` files. `RUST_LOG` overrides the configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Rolled files kept when nothing else is configured
pub const DEFAULT_KEEP_FILES: usize = 14;

/// Logger settings
#[derive(Debug, Clone)]
pub struct LogSettings<'a> {
    pub level: &'a str,
    /// One JSON object per line instead of human-readable text
    pub json: bool,
    pub dir: Option<&'a str>,
    pub keep_files: usize,
}

impl Default for LogSettings<'_> {
    fn default() -> Self {
        Self {
            level: "info",
            json: false,
            dir: None,
            keep_files: DEFAULT_KEEP_FILES,
        }
    }
}

/// Initialize the console logger at `info`
pub fn init_logger() {
    init_logger_with(&LogSettings::default());
}

/// Initialize the logger with an optional level and log directory
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    init_logger_with(&LogSettings {
        level: log_level.unwrap_or("info"),
        dir: log_dir,
        ..LogSettings::default()
    });
}

/// Initialize the logger.
///
/// Only the first call in a process installs a subscriber; later calls are
/// ignored, so tests may call it freely.
pub fn init_logger_with(settings: &LogSettings<'_>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match settings.dir.and_then(|dir| rolling_appender(dir, settings.keep_files)) {
        Some(appender) if settings.json => {
            let _ = builder.json().with_writer(appender).with_ansi(false).try_init();
        }
        Some(appender) => {
            let _ = builder.with_writer(appender).with_ansi(false).try_init();
        }
        None if settings.json => {
            let _ = builder.json().try_init();
        }
        None => {
            let _ = builder.try_init();
        }
    }
}

fn rolling_appender(dir: &str, keep_files: usize) -> Option<RollingFileAppender> {
    if !Path::new(dir).is_dir() {
        eprintln!("Log directory {} does not exist, logging to stdout", dir);
        return None;
    }

    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("cutwork")
        .max_log_files(keep_files.max(1))
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("Cannot create rolling log in {}: {}, logging to stdout", dir, e);
            None
        }
    }
}
