//! Cutwork - piecework tracking for a garment-cutting floor
//!
//! # Overview
//!
//! Workers are handed piece ranges from numbered bundles of a cut (one
//! production batch) and paid per piece at the rate of the department that
//! did the work. This crate stores those records and turns them into payroll
//! and production reports.
//!
//! - **Cuts** (`cuts`): bundle generation and department rates
//! - **Assignments** (`assignments`): bundle availability, eligibility, entry checks
//! - **Reports** (`reports`): production matrix, daily history, daily breakdown, ledger
//! - **Persistence** (`db`): redb whole-collection store and repositories
//!
//! # Layout
//!
//! ```text
//! cutwork/src/
//! ├── core/          # config, Workshop facade
//! ├── cuts/          # cut planning
//! ├── assignments/   # availability and entry validation
//! ├── reports/       # aggregation and display projection
//! ├── db/            # storage and repositories
//! └── utils/         # logger, calendar days
//! ```

pub mod assignments;
pub mod core;
pub mod cuts;
pub mod db;
pub mod reports;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Snapshot, Workshop};
pub use assignments::{available_bundles, eligible_employees};
pub use reports::{
    Projector, aggregate_employee_history, aggregate_matrix, assignment_log, breakdown_for_day,
};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{LogSettings, init_logger, init_logger_with, init_logger_with_file};

/// Start logging as configured
pub fn init_logging(config: &Config) {
    init_logger_with(&LogSettings {
        level: &config.log_level,
        json: config.log_json,
        dir: config.log_dir.as_deref(),
        keep_files: config.log_keep_files,
    });
}
