//! Utilities: logging setup and calendar-day helpers

pub mod logger;
pub mod time;
