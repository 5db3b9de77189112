//! Unified error codes for the cutwork workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Employee errors
//! - 2xxx: Category (department) errors
//! - 3xxx: Cut errors (operations, bundles)
//! - 4xxx: Assignment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize as plain
/// JSON numbers for whatever front end sits on top of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 1xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 1001,
    /// Employee name is empty
    EmployeeNameEmpty = 1002,
    /// Employee has no department and none can be defaulted
    EmployeeRoleMissing = 1003,

    // ==================== 2xxx: Category ====================
    /// Category already exists
    CategoryExists = 2002,
    /// Category name is empty
    CategoryNameEmpty = 2003,

    // ==================== 3xxx: Cut ====================
    /// Cut not found
    CutNotFound = 3001,
    /// Cut number is empty
    CutNumberEmpty = 3002,
    /// Total pieces must be positive
    InvalidTotalPieces = 3003,
    /// At least one positive operation rate is required
    NoOperationRates = 3004,
    /// Bundle size must be positive
    InvalidBundleSize = 3005,
    /// Operation not found on the cut
    OperationNotFound = 3006,
    /// Bundle not found on the cut
    BundleNotFound = 3007,
    /// The same department is rated twice on one cut
    DuplicateOperationRate = 3008,

    // ==================== 4xxx: Assignment ====================
    /// Assignment not found
    AssignmentNotFound = 4001,
    /// Start piece is after end piece
    InvalidPieceRange = 4002,
    /// Piece range falls outside the bundle
    RangeOutsideBundle = 4003,
    /// Every piece of the bundle is already assigned for this operation
    BundleUnavailable = 4004,

    // ==================== 9xxx: System ====================
    /// Storage error
    StorageError = 9002,
    /// Serialization error
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeNameEmpty => "Employee name is required",
            ErrorCode::EmployeeRoleMissing => "Employee department is required",

            // Category
            ErrorCode::CategoryExists => "Category already exists",
            ErrorCode::CategoryNameEmpty => "Category name is required",

            // Cut
            ErrorCode::CutNotFound => "Cut not found",
            ErrorCode::CutNumberEmpty => "Cut number is required",
            ErrorCode::InvalidTotalPieces => "Total pieces must be greater than zero",
            ErrorCode::NoOperationRates => "At least one department rate is required",
            ErrorCode::InvalidBundleSize => "Bundle size must be greater than zero",
            ErrorCode::OperationNotFound => "Operation not found",
            ErrorCode::BundleNotFound => "Bundle not found",
            ErrorCode::DuplicateOperationRate => "Each department can be rated only once per cut",

            // Assignment
            ErrorCode::AssignmentNotFound => "Assignment not found",
            ErrorCode::InvalidPieceRange => "Start piece must not exceed end piece",
            ErrorCode::RangeOutsideBundle => "Piece range is outside the bundle",
            ErrorCode::BundleUnavailable => "Bundle is already fully assigned",

            // System
            ErrorCode::StorageError => "Storage error",
            ErrorCode::SerializationError => "Serialization error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),

            // Employee
            1001 => Ok(ErrorCode::EmployeeNotFound),
            1002 => Ok(ErrorCode::EmployeeNameEmpty),
            1003 => Ok(ErrorCode::EmployeeRoleMissing),

            // Category
            2002 => Ok(ErrorCode::CategoryExists),
            2003 => Ok(ErrorCode::CategoryNameEmpty),

            // Cut
            3001 => Ok(ErrorCode::CutNotFound),
            3002 => Ok(ErrorCode::CutNumberEmpty),
            3003 => Ok(ErrorCode::InvalidTotalPieces),
            3004 => Ok(ErrorCode::NoOperationRates),
            3005 => Ok(ErrorCode::InvalidBundleSize),
            3006 => Ok(ErrorCode::OperationNotFound),
            3007 => Ok(ErrorCode::BundleNotFound),
            3008 => Ok(ErrorCode::DuplicateOperationRate),

            // Assignment
            4001 => Ok(ErrorCode::AssignmentNotFound),
            4002 => Ok(ErrorCode::InvalidPieceRange),
            4003 => Ok(ErrorCode::RangeOutsideBundle),
            4004 => Ok(ErrorCode::BundleUnavailable),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::SerializationError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::DuplicateOperationRate.code(), 3008);

        assert_eq!(ErrorCode::EmployeeNotFound.code(), 1001);
        assert_eq!(ErrorCode::CategoryExists.code(), 2002);
        assert_eq!(ErrorCode::CutNotFound.code(), 3001);
        assert_eq!(ErrorCode::BundleNotFound.code(), 3007);
        assert_eq!(ErrorCode::AssignmentNotFound.code(), 4001);
        assert_eq!(ErrorCode::BundleUnavailable.code(), 4004);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::CutNotFound.is_success());
    }

    #[test]
    fn test_try_from_every_variant() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::EmployeeNotFound,
            ErrorCode::EmployeeNameEmpty,
            ErrorCode::EmployeeRoleMissing,
            ErrorCode::CategoryExists,
            ErrorCode::CategoryNameEmpty,
            ErrorCode::CutNotFound,
            ErrorCode::CutNumberEmpty,
            ErrorCode::InvalidTotalPieces,
            ErrorCode::NoOperationRates,
            ErrorCode::InvalidBundleSize,
            ErrorCode::OperationNotFound,
            ErrorCode::BundleNotFound,
            ErrorCode::DuplicateOperationRate,
            ErrorCode::AssignmentNotFound,
            ErrorCode::InvalidPieceRange,
            ErrorCode::RangeOutsideBundle,
            ErrorCode::BundleUnavailable,
            ErrorCode::StorageError,
            ErrorCode::SerializationError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(2001), Err(InvalidErrorCode(2001)));
        assert_eq!(ErrorCode::try_from(5000), Err(InvalidErrorCode(5000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::CutNotFound).unwrap();
        assert_eq!(json, "3001");

        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::InvalidPieceRange);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::AssignmentNotFound), "4001");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::CutNotFound.message(), "Cut not found");
        assert_eq!(
            ErrorCode::BundleUnavailable.message(),
            "Bundle is already fully assigned"
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
