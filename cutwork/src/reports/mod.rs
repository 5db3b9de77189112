//! Report engine
//!
//! Three aggregate views over the same assignment list, joined the same way:
//!
//! | View | Rows | Columns |
//! |------|------|---------|
//! | [`aggregate_matrix`] | employee | (product, department, rate) |
//! | [`aggregate_employee_history`] | work day | that employee's (product, department, rate) |
//! | [`breakdown_for_day`] | product → cut number → bundle line | - |
//!
//! An assignment whose employee, cut or operation cannot be resolved is left
//! out of all three. A missing bundle only blanks the bundle number. The
//! totals reconcile: a day in the history equals that day's breakdown, and
//! the unfiltered matrix grand total equals the sum of every breakdown.
//!
//! All functions are pure and recompute from the snapshot on every call.

pub mod breakdown;
pub mod columns;
pub mod history;
pub mod ledger;
pub mod lookup;
pub mod matrix;
pub mod projection;

#[cfg(test)]
pub(crate) mod testing;

pub use breakdown::{CutGroup, DailyBreakdown, LineItem, ProductGroup, breakdown_for_day};
pub use columns::{ColumnKey, Tally};
pub use history::{EmployeeHistory, HistoryDay, aggregate_employee_history};
pub use ledger::{LedgerRow, assignment_log};
pub use matrix::{MatrixRow, ProductionMatrix, aggregate_matrix};
pub use projection::{BreakdownSheet, HistoryTable, MatrixTable, NO_DATA, Projector};
