//! Display projection
//!
//! Turns aggregates into ready-to-print strings. Only formats: every number
//! shown is taken from the aggregate unchanged and rounded for display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::money::{format_amount, format_amount_grouped, format_count_grouped};

use super::breakdown::DailyBreakdown;
use super::columns::{ColumnKey, Tally};
use super::history::EmployeeHistory;
use super::ledger::{DELETED_ROLE, UNKNOWN_BUNDLE, UNKNOWN_EMPLOYEE};
use super::matrix::ProductionMatrix;
use crate::utils::time::format_work_day;

/// Marker for a cell with no records (a recorded zero prints as `0`)
pub const NO_DATA: &str = "-";

pub const NO_RECORDS: &str = "No records found for this department.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub product: String,
    pub operation: String,
    /// `Rs 2.50`
    pub rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixLine {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    /// Piece counts, or [`NO_DATA`]
    pub cells: Vec<String>,
    pub earnings: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixTable {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<MatrixLine>,
    /// `Rs 1,234.50`
    pub total_payable: String,
    /// `1,250`
    pub total_pieces: String,
    /// Set when there are no rows
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryCell {
    /// `50 pcs`, or [`NO_DATA`]
    pub pieces: String,
    /// `Rs 125.00`, or [`NO_DATA`]
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryLine {
    pub date: NaiveDate,
    /// `10 Jan 2024`
    pub date_label: String,
    pub cells: Vec<HistoryCell>,
    pub daily_pieces: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryTable {
    pub employee_name: String,
    /// `Cutting Department`
    pub department: String,
    pub total_earnings: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<HistoryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    /// `#1`, or `#??`
    pub bundle: String,
    /// `1 - 50`
    pub range: String,
    pub rate: String,
    pub pieces: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutSheet {
    /// `CUT #101`
    pub heading: String,
    pub pieces: String,
    pub amount: String,
    pub lines: Vec<BreakdownLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSheet {
    pub name: String,
    pub cuts: Vec<CutSheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSheet {
    pub date_label: String,
    pub total_pieces: String,
    pub total_amount: String,
    pub products: Vec<ProductSheet>,
}

/// Formats aggregates with a currency label
#[derive(Debug, Clone)]
pub struct Projector {
    currency_prefix: String,
}

impl Projector {
    pub fn new(currency_prefix: impl Into<String>) -> Self {
        Self {
            currency_prefix: currency_prefix.into(),
        }
    }

    /// `Rs 125.00`
    pub fn money(&self, value: Decimal) -> String {
        format!("{} {}", self.currency_prefix, format_amount(value))
    }

    /// `Rs 12,345.50`
    pub fn money_grouped(&self, value: Decimal) -> String {
        format!("{} {}", self.currency_prefix, format_amount_grouped(value))
    }

    fn header(&self, key: &ColumnKey) -> ColumnHeader {
        ColumnHeader {
            product: key.product.clone(),
            operation: key.operation.clone(),
            rate: self.money(key.price),
        }
    }

    pub fn matrix(&self, matrix: &ProductionMatrix) -> MatrixTable {
        let rows = matrix
            .rows
            .iter()
            .map(|row| MatrixLine {
                employee_id: row.employee_id.clone(),
                name: row.name.clone(),
                role: row.role.clone(),
                cells: row
                    .cells
                    .iter()
                    .map(|cell| match cell {
                        Some(tally) => tally.pieces.to_string(),
                        None => NO_DATA.to_string(),
                    })
                    .collect(),
                earnings: self.money(row.total_pay),
            })
            .collect::<Vec<_>>();

        MatrixTable {
            columns: matrix.columns.iter().map(|k| self.header(k)).collect(),
            empty_message: rows.is_empty().then_some(NO_RECORDS),
            rows,
            total_payable: self.money_grouped(matrix.grand_total_pay),
            total_pieces: format_count_grouped(matrix.grand_total_pieces),
        }
    }

    fn history_cell(&self, cell: &Option<Tally>) -> HistoryCell {
        match cell {
            Some(tally) => HistoryCell {
                pieces: format!("{} pcs", tally.pieces),
                amount: self.money(tally.pay),
            },
            None => HistoryCell {
                pieces: NO_DATA.to_string(),
                amount: NO_DATA.to_string(),
            },
        }
    }

    pub fn history(&self, history: &EmployeeHistory) -> HistoryTable {
        let (name, role) = match &history.employee {
            Some(e) => (e.name.as_str(), e.role.as_str()),
            None => (UNKNOWN_EMPLOYEE, DELETED_ROLE),
        };

        HistoryTable {
            employee_name: name.to_string(),
            department: format!("{} Department", role),
            total_earnings: self.money(history.total_pay),
            columns: history
                .columns
                .iter()
                .map(|k| {
                    let mut header = self.header(k);
                    header.rate.push_str(" / pc");
                    header
                })
                .collect(),
            rows: history
                .days
                .iter()
                .map(|day| HistoryLine {
                    date: day.date,
                    date_label: format_work_day(day.date),
                    cells: day.cells.iter().map(|c| self.history_cell(c)).collect(),
                    daily_pieces: day.total_pieces.to_string(),
                })
                .collect(),
        }
    }

    pub fn breakdown(&self, breakdown: &DailyBreakdown) -> BreakdownSheet {
        BreakdownSheet {
            date_label: format_work_day(breakdown.date),
            total_pieces: breakdown.total_pieces.to_string(),
            total_amount: self.money(breakdown.total_pay),
            products: breakdown
                .products
                .iter()
                .map(|product| ProductSheet {
                    name: product.product.clone(),
                    cuts: product
                        .cuts
                        .iter()
                        .map(|cut| CutSheet {
                            heading: format!("CUT #{}", cut.cut_number),
                            pieces: cut.pieces().to_string(),
                            amount: self.money(cut.amount()),
                            lines: cut
                                .items
                                .iter()
                                .map(|item| BreakdownLine {
                                    bundle: match item.bundle_number {
                                        Some(n) => format!("#{}", n),
                                        None => format!("#{}", UNKNOWN_BUNDLE),
                                    },
                                    range: item.range(),
                                    rate: self.money(item.rate),
                                    pieces: item.pieces.to_string(),
                                    amount: self.money(item.amount),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
