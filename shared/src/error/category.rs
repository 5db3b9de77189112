//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Employee errors
/// - 2xxx: Category errors
/// - 3xxx: Cut errors
/// - 4xxx: Assignment errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Employee errors (1xxx)
    Employee,
    /// Category errors (2xxx)
    Category,
    /// Cut errors (3xxx)
    Cut,
    /// Assignment errors (4xxx)
    Assignment,
    /// System errors (5xxx and up)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Employee,
            2000..3000 => Self::Category,
            3000..4000 => Self::Cut,
            4000..5000 => Self::Assignment,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Employee => "employee",
            Self::Category => "category",
            Self::Cut => "cut",
            Self::Assignment => "assignment",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
