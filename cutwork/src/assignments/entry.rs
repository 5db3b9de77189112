//! Assignment entry (派工录入)
//!
//! Checks a draft against the current snapshot before it is stored. The
//! aggregators tolerate bad records; this is where they are kept out.

use chrono_tz::Tz;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Assignment, AssignmentCreate, AssignmentUpdate, Cut, Employee};
use shared::util::new_id;

use super::availability::available_bundles;
use crate::utils::time::{day_start_millis, work_day};

/// Validate a draft.
///
/// `editing` is the id of the record being re-edited, if any; its own range
/// does not count against bundle availability. Eligibility (role vs
/// operation) is not checked here.
pub fn validate_draft(
    draft: &AssignmentCreate,
    employees: &[Employee],
    cuts: &[Cut],
    assignments: &[Assignment],
    editing: Option<&str>,
) -> AppResult<()> {
    if !employees.iter().any(|e| e.id == draft.employee_id) {
        return Err(AppError::new(ErrorCode::EmployeeNotFound)
            .with_detail("employee_id", draft.employee_id.as_str()));
    }

    let cut = cuts
        .iter()
        .find(|c| c.id == draft.cut_id)
        .ok_or_else(|| {
            AppError::new(ErrorCode::CutNotFound).with_detail("cut_id", draft.cut_id.as_str())
        })?;

    if cut.operation(&draft.operation_id).is_none() {
        return Err(AppError::new(ErrorCode::OperationNotFound)
            .with_detail("operation_id", draft.operation_id.as_str()));
    }

    let bundle = cut.bundle(&draft.bundle_id).ok_or_else(|| {
        AppError::new(ErrorCode::BundleNotFound).with_detail("bundle_id", draft.bundle_id.as_str())
    })?;

    if draft.start_piece > draft.end_piece {
        return Err(AppError::new(ErrorCode::InvalidPieceRange)
            .with_detail("start_piece", draft.start_piece)
            .with_detail("end_piece", draft.end_piece));
    }

    if !bundle.contains(draft.start_piece) || !bundle.contains(draft.end_piece) {
        return Err(AppError::new(ErrorCode::RangeOutsideBundle)
            .with_detail("start_piece", draft.start_piece)
            .with_detail("end_piece", draft.end_piece)
            .with_detail("bundle_start", bundle.start)
            .with_detail("bundle_end", bundle.end));
    }

    let open = available_bundles(cut, &draft.operation_id, assignments, editing);
    if !open.iter().any(|b| b.id == bundle.id) {
        return Err(AppError::new(ErrorCode::BundleUnavailable)
            .with_detail("bundle_number", bundle.bundle_number));
    }

    Ok(())
}

/// Turn a validated draft into a new record
pub fn new_assignment(draft: AssignmentCreate, tz: Tz) -> Assignment {
    Assignment {
        id: new_id(),
        assigned_at: day_start_millis(draft.work_date, tz),
        employee_id: draft.employee_id,
        cut_id: draft.cut_id,
        operation_id: draft.operation_id,
        bundle_id: draft.bundle_id,
        start_piece: draft.start_piece,
        end_piece: draft.end_piece,
    }
}

/// Draft for re-editing: the existing record with the update laid over it
pub fn merge_update(existing: &Assignment, data: AssignmentUpdate, tz: Tz) -> AssignmentCreate {
    AssignmentCreate {
        employee_id: data.employee_id.unwrap_or_else(|| existing.employee_id.clone()),
        cut_id: data.cut_id.unwrap_or_else(|| existing.cut_id.clone()),
        operation_id: data
            .operation_id
            .unwrap_or_else(|| existing.operation_id.clone()),
        bundle_id: data.bundle_id.unwrap_or_else(|| existing.bundle_id.clone()),
        start_piece: data.start_piece.unwrap_or(existing.start_piece),
        end_piece: data.end_piece.unwrap_or(existing.end_piece),
        work_date: data
            .work_date
            .unwrap_or_else(|| work_day(existing.assigned_at, tz)),
    }
}

/// Replacement record for `existing`, keeping its id
pub fn revise_assignment(existing: &Assignment, draft: AssignmentCreate, tz: Tz) -> Assignment {
    Assignment {
        id: existing.id.clone(),
        ..new_assignment(draft, tz)
    }
}
