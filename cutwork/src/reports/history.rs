//! One employee's work, day by day

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Assignment, Cut, Employee};
use std::collections::BTreeMap;

use super::columns::{Cells, ColumnKey, Columns, Tally};
use super::lookup::Lookup;
use crate::utils::time::work_day;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryDay {
    /// Calendar day in the business timezone (grouping and sort key)
    pub date: NaiveDate,
    /// Aligned with [`EmployeeHistory::columns`]
    pub cells: Vec<Option<Tally>>,
    pub total_pieces: i64,
    pub total_pay: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeHistory {
    pub employee_id: String,
    /// `None` when the employee no longer exists
    pub employee: Option<Employee>,
    /// This employee's columns, first-seen order
    pub columns: Vec<ColumnKey>,
    /// Most recent day first
    pub days: Vec<HistoryDay>,
    pub total_pieces: i64,
    pub total_pay: Decimal,
}

impl EmployeeHistory {
    pub fn day(&self, date: NaiveDate) -> Option<&HistoryDay> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Group one employee's assignments by work day.
///
/// Times of day collapse: every assignment falling on the same calendar day
/// in `tz` lands in one row.
pub fn aggregate_employee_history(
    employee_id: &str,
    employees: &[Employee],
    assignments: &[Assignment],
    cuts: &[Cut],
    tz: Tz,
) -> EmployeeHistory {
    let lookup = Lookup::new(employees, cuts);
    let employee = lookup.employee(employee_id).found().cloned();

    let mut columns = Columns::default();
    let mut days: BTreeMap<NaiveDate, (Cells, Tally)> = BTreeMap::new();

    let own = assignments
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .filter_map(|a| lookup.join(a).ok());

    for joined in own {
        let column = columns.slot(ColumnKey::of(joined.cut, joined.operation));
        let date = work_day(joined.assignment.assigned_at, tz);
        let (pieces, pay) = (joined.pieces(), joined.pay());

        let (cells, total) = days.entry(date).or_default();
        cells.add(column, pieces, pay);
        total.add(pieces, pay);
    }

    let width = columns.len();
    let days: Vec<HistoryDay> = days
        .into_iter()
        .rev()
        .map(|(date, (cells, total))| HistoryDay {
            date,
            cells: cells.into_row(width),
            total_pieces: total.pieces,
            total_pay: total.pay,
        })
        .collect();

    EmployeeHistory {
        employee_id: employee_id.to_string(),
        employee,
        columns: columns.into_keys(),
        total_pieces: days.iter().map(|d| d.total_pieces).sum(),
        total_pay: days.iter().map(|d| d.total_pay).sum(),
        days,
    }
}
