use chrono_tz::Tz;
use std::path::PathBuf;

use crate::utils::logger::DEFAULT_KEEP_FILES;
use crate::utils::time::parse_timezone;

/// Workshop configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file in the
/// working directory is read first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CUTWORK_DATA_DIR | ./data | directory holding the database file |
/// | CUTWORK_DB_FILE | cutwork.redb | database file name |
/// | DEFAULT_BUNDLE_SIZE | 50 | pieces per bundle when cutting |
/// | BUSINESS_TIMEZONE | UTC | IANA zone that decides the work day |
/// | CURRENCY_PREFIX | Rs | label in front of rendered amounts |
/// | LOG_LEVEL | info | logger level |
/// | LOG_DIR | (unset) | rolling log directory |
/// | LOG_JSON | false | JSON lines instead of text |
/// | LOG_KEEP_FILES | 14 | rolled log files kept |
///
/// # Example
///
/// ```ignore
/// CUTWORK_DATA_DIR=/srv/shop BUSINESS_TIMEZONE=Asia/Kolkata cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the database file
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub db_file: String,
    /// Default pieces per bundle
    pub default_bundle_size: i64,
    /// Timezone used to truncate `assigned_at` to a work day
    pub timezone: Tz,
    /// Currency label, e.g. `Rs`
    pub currency_prefix: String,
    /// Logger level
    pub log_level: String,
    /// Optional rolling log directory
    pub log_dir: Option<String>,
    /// Emit JSON log lines
    pub log_json: bool,
    pub log_keep_files: usize,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        let timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => parse_timezone(&name).unwrap_or_else(|| {
                tracing::warn!("Unknown BUSINESS_TIMEZONE '{}', falling back to UTC", name);
                Tz::UTC
            }),
            Err(_) => Tz::UTC,
        };

        Self {
            data_dir: std::env::var("CUTWORK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            db_file: std::env::var("CUTWORK_DB_FILE").unwrap_or_else(|_| "cutwork.redb".into()),
            default_bundle_size: std::env::var("DEFAULT_BUNDLE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &i64| *size > 0)
                .unwrap_or(50),
            timezone,
            currency_prefix: std::env::var("CURRENCY_PREFIX").unwrap_or_else(|_| "Rs".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            log_json: std::env::var("LOG_JSON")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_keep_files: std::env::var("LOG_KEEP_FILES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KEEP_FILES),
        }
    }

    /// Point the store at another directory, keeping everything else.
    ///
    /// Mostly for tests.
    pub fn with_overrides(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_sets_data_dir() {
        let config = Config::with_overrides("/tmp/cutwork-test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cutwork-test"));
        assert!(config.db_path().starts_with("/tmp/cutwork-test"));
        assert!(config.default_bundle_size > 0);
    }
}
