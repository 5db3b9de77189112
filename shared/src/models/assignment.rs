//! Assignment Model (派工记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One worker completing pieces `[start_piece, end_piece]` of one bundle,
/// for one operation on one cut, on one day.
///
/// Foreign keys are stored denormalized. Any of them may point at a record
/// that has since been deleted or regenerated; readers resolve them at read
/// time and degrade to placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub employee_id: String,
    pub cut_id: String,
    pub operation_id: String,
    pub bundle_id: String,
    /// Inclusive, 1-indexed
    pub start_piece: i64,
    /// Inclusive, 1-indexed
    pub end_piece: i64,
    /// Work day (Unix millis, start of the day in the business timezone)
    pub assigned_at: i64,
}

impl Assignment {
    /// Literal piece count `end - start + 1`.
    ///
    /// Not clamped: an inverted range yields zero or a negative count, which
    /// flows into totals as-is. Check [`Assignment::has_inverted_range`]
    /// before trusting the number.
    #[inline]
    pub fn piece_count(&self) -> i64 {
        self.end_piece - self.start_piece + 1
    }

    /// `start_piece > end_piece`
    #[inline]
    pub fn has_inverted_range(&self) -> bool {
        self.start_piece > self.end_piece
    }

    /// Pieces covered by this record (empty for inverted ranges)
    #[inline]
    pub fn pieces(&self) -> std::ops::RangeInclusive<i64> {
        self.start_piece..=self.end_piece
    }
}

impl_id_identity!(Assignment);

/// Create assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreate {
    pub employee_id: String,
    pub cut_id: String,
    pub operation_id: String,
    pub bundle_id: String,
    pub start_piece: i64,
    pub end_piece: i64,
    /// Calendar day the work was done
    pub work_date: NaiveDate,
}

/// Update assignment payload (re-editing an existing record)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    pub employee_id: Option<String>,
    pub cut_id: Option<String>,
    pub operation_id: Option<String>,
    pub bundle_id: Option<String>,
    pub start_piece: Option<i64>,
    pub end_piece: Option<i64>,
    pub work_date: Option<NaiveDate>,
}
