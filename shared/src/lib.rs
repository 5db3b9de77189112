//! Shared types for the cutwork workspace
//!
//! Entity shapes, money helpers and the unified error type used by the
//! `cutwork` crate and by any front end that reads the persisted JSON.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
