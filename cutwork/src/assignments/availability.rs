//! Bundle availability and employee eligibility
//!
//! Both are pure functions over a snapshot and are cheap enough to rerun on
//! every picker change without an index.

use shared::models::{Assignment, Bundle, Cut, Employee, Operation};
use std::collections::HashSet;

/// Bundles of `cut` that still have at least one unassigned piece for
/// `operation_id`.
///
/// Covered pieces are the union of every matching assignment's inclusive
/// range, skipping `exclude_assignment_id` so a record being re-edited does
/// not block its own bundle. This is a bundle-level filter: a partially
/// covered bundle is returned whole.
pub fn available_bundles<'a>(
    cut: &'a Cut,
    operation_id: &str,
    assignments: &[Assignment],
    exclude_assignment_id: Option<&str>,
) -> Vec<&'a Bundle> {
    let covered = covered_pieces(cut, operation_id, assignments, exclude_assignment_id);

    cut.bundles
        .iter()
        .filter(|bundle| taken_in(bundle, &covered) < bundle.piece_count())
        .collect()
}

/// Every piece number of `cut` already claimed for `operation_id`.
///
/// Pieces outside the cut's bundles cannot affect availability and are not
/// collected.
pub fn covered_pieces(
    cut: &Cut,
    operation_id: &str,
    assignments: &[Assignment],
    exclude_assignment_id: Option<&str>,
) -> HashSet<i64> {
    let lo = cut.bundles.iter().map(|b| b.start).min().unwrap_or(1);
    let hi = cut.bundles.iter().map(|b| b.end).max().unwrap_or(0);

    assignments
        .iter()
        .filter(|a| a.cut_id == cut.id && a.operation_id == operation_id)
        .filter(|a| Some(a.id.as_str()) != exclude_assignment_id)
        .flat_map(|a| a.start_piece.max(lo)..=a.end_piece.min(hi))
        .collect()
}

fn taken_in(bundle: &Bundle, covered: &HashSet<i64>) -> i64 {
    (bundle.start..=bundle.end).filter(|p| covered.contains(p)).count() as i64
}

/// Employees whose role names this operation's department.
///
/// Case-insensitive on trimmed values. The matrix role filter elsewhere is an
/// exact match; the two are intentionally different.
pub fn eligible_employees<'a>(employees: &'a [Employee], operation: &Operation) -> Vec<&'a Employee> {
    let wanted = operation.name.trim().to_lowercase();
    employees
        .iter()
        .filter(|e| e.role.trim().to_lowercase() == wanted)
        .collect()
}
