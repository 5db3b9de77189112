//! Assignment ledger: every stored record, resolved for display
//!
//! Unlike the aggregate views nothing is dropped here. Each reference that
//! no longer resolves shows a placeholder so the record can still be found
//! and fixed or deleted.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{Assignment, Cut, Employee};

use super::lookup::Lookup;
use crate::utils::time::{format_work_day, work_day};

pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";
pub const DELETED_ROLE: &str = "Deleted Role";
pub const DELETED_CUT: &str = "Deleted";
pub const DELETED_OPERATION: &str = "Deleted Op";
pub const UNKNOWN_BUNDLE: &str = "??";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub assignment_id: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub employee: String,
    pub role: String,
    pub cut_number: String,
    pub operation: String,
    /// `#3`, or `#??` for a bundle that no longer exists
    pub bundle: String,
    pub pieces: i64,
    /// `(1-50)`
    pub range: String,
    pub inverted: bool,
}

/// One row per assignment, in stored order (newest first)
pub fn assignment_log(
    assignments: &[Assignment],
    employees: &[Employee],
    cuts: &[Cut],
    tz: Tz,
) -> Vec<LedgerRow> {
    let lookup = Lookup::new(employees, cuts);

    assignments
        .iter()
        .map(|a| {
            let employee = lookup.employee(&a.employee_id).found();
            let cut = lookup.cut(&a.cut_id).found();
            let operation = lookup.operation(&a.cut_id, &a.operation_id).found();
            let bundle = lookup.bundle(&a.cut_id, &a.bundle_id).found();
            let date = work_day(a.assigned_at, tz);

            LedgerRow {
                assignment_id: a.id.clone(),
                date,
                date_label: format_work_day(date),
                employee: employee.map_or(UNKNOWN_EMPLOYEE, |e| e.name.as_str()).to_string(),
                role: employee.map_or(DELETED_ROLE, |e| e.role.as_str()).to_string(),
                cut_number: cut.map_or(DELETED_CUT, |c| c.cut_number.as_str()).to_string(),
                operation: operation.map_or(DELETED_OPERATION, |o| o.name.as_str()).to_string(),
                bundle: match bundle {
                    Some(b) => format!("#{}", b.bundle_number),
                    None => format!("#{}", UNKNOWN_BUNDLE),
                },
                pieces: a.piece_count(),
                range: format!("({}-{})", a.start_piece, a.end_piece),
                inverted: a.has_inverted_range(),
            }
        })
        .collect()
}
