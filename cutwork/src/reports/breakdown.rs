//! Daily breakdown: product → cut number → bundle lines
//!
//! Drill-down for one employee on one day. Keeps the literal cut number so
//! lines can be checked against the physical bundle tags.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Assignment, Cut, Employee};

use super::lookup::{Joined, Lookup};
use crate::utils::time::work_day;

/// Product heading for cuts without a name
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub assignment_id: String,
    pub operation: String,
    /// `None` when the bundle was regenerated away
    pub bundle_number: Option<u32>,
    pub start_piece: i64,
    pub end_piece: i64,
    pub pieces: i64,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    fn from_joined(joined: &Joined<'_>) -> Self {
        let a = joined.assignment;
        Self {
            assignment_id: a.id.clone(),
            operation: joined.operation.name.clone(),
            bundle_number: joined.bundle_number(),
            start_piece: a.start_piece,
            end_piece: a.end_piece,
            pieces: joined.pieces(),
            rate: joined.operation.price,
            amount: joined.pay(),
        }
    }

    /// `1 - 50`
    pub fn range(&self) -> String {
        format!("{} - {}", self.start_piece, self.end_piece)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutGroup {
    pub cut_number: String,
    pub items: Vec<LineItem>,
}

impl CutGroup {
    pub fn pieces(&self) -> i64 {
        self.items.iter().map(|i| i.pieces).sum()
    }

    pub fn amount(&self) -> Decimal {
        self.items.iter().map(|i| i.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductGroup {
    pub product: String,
    pub cuts: Vec<CutGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBreakdown {
    pub employee_id: String,
    pub date: NaiveDate,
    /// First-seen order, as are the cut groups inside each product
    pub products: Vec<ProductGroup>,
    pub total_pieces: i64,
    pub total_pay: Decimal,
}

impl DailyBreakdown {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Hierarchy of one employee's lines on `date` (calendar day in `tz`).
///
/// An employee that no longer exists yields an empty breakdown.
pub fn breakdown_for_day(
    employee_id: &str,
    date: NaiveDate,
    employees: &[Employee],
    assignments: &[Assignment],
    cuts: &[Cut],
    tz: Tz,
) -> DailyBreakdown {
    let lookup = Lookup::new(employees, cuts);
    let mut products: Vec<ProductGroup> = Vec::new();

    let lines = assignments
        .iter()
        .filter(|a| a.employee_id == employee_id && work_day(a.assigned_at, tz) == date)
        .filter_map(|a| lookup.join(a).ok());

    for joined in lines {
        let product = joined.cut.product_name().unwrap_or(UNNAMED_PRODUCT);
        let p = match products.iter().position(|p| p.product == product) {
            Some(i) => i,
            None => {
                products.push(ProductGroup {
                    product: product.to_string(),
                    cuts: Vec::new(),
                });
                products.len() - 1
            }
        };
        let group = &mut products[p];

        let cut_number = joined.cut.cut_number.as_str();
        let c = match group.cuts.iter().position(|c| c.cut_number == cut_number) {
            Some(i) => i,
            None => {
                group.cuts.push(CutGroup {
                    cut_number: cut_number.to_string(),
                    items: Vec::new(),
                });
                group.cuts.len() - 1
            }
        };

        group.cuts[c].items.push(LineItem::from_joined(&joined));
    }

    let groups = || products.iter().flat_map(|p| p.cuts.iter());
    let total_pieces = groups().map(CutGroup::pieces).sum();
    let total_pay = groups().map(CutGroup::amount).sum();

    DailyBreakdown {
        employee_id: employee_id.to_string(),
        date,
        products,
        total_pieces,
        total_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::history::aggregate_employee_history;
    use crate::reports::testing::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_hierarchy() {
        let s = snapshot();
        let b = breakdown_for_day("e-1", day(10), &s.employees, &s.assignments, &s.cuts, Tz::UTC);

        assert_eq!(b.products.len(), 1);
        let product = &b.products[0];
        assert_eq!(product.product, "A-101");
        assert_eq!(product.cuts.len(), 1);

        let cut = &product.cuts[0];
        assert_eq!(cut.cut_number, "101");
        let bundles: Vec<Option<u32>> = cut.items.iter().map(|i| i.bundle_number).collect();
        assert_eq!(bundles, vec![Some(1), Some(3)]);
        assert_eq!(cut.items[0].range(), "1 - 50");
        assert_eq!(cut.items[0].amount, Decimal::from(125));
        assert_eq!(cut.pieces(), 60);

        assert_eq!(b.total_pieces, 60);
        assert_eq!(b.total_pay, Decimal::from(150));
    }

    #[test]
    fn test_unnamed_product() {
        let s = snapshot();
        let b = breakdown_for_day("e-1", day(11), &s.employees, &s.assignments, &s.cuts, Tz::UTC);
        assert_eq!(b.products[0].product, UNNAMED_PRODUCT);
        assert_eq!(b.products[0].cuts[0].cut_number, "7");
        assert_eq!(b.total_pay, Decimal::from(60));
    }

    #[test]
    fn test_orphaned_bundle_line() {
        let mut s = snapshot();
        s.assignments[0].bundle_id = "regenerated".to_string();
        let b = breakdown_for_day("e-1", day(10), &s.employees, &s.assignments, &s.cuts, Tz::UTC);
        assert_eq!(b.products[0].cuts[0].items[0].bundle_number, None);
        assert_eq!(b.total_pieces, 60);
    }

    #[test]
    fn test_matches_history_day() {
        let s = snapshot();
        let h = aggregate_employee_history("e-1", &s.employees, &s.assignments, &s.cuts, Tz::UTC);
        for d in &h.days {
            let b = breakdown_for_day("e-1", d.date, &s.employees, &s.assignments, &s.cuts, Tz::UTC);
            assert_eq!(b.total_pieces, d.total_pieces);
            assert_eq!(b.total_pay, d.total_pay);
        }
    }

    #[test]
    fn test_deleted_employee_is_empty() {
        let mut s = snapshot();
        s.employees.retain(|e| e.id != "e-1");
        let b = breakdown_for_day("e-1", day(10), &s.employees, &s.assignments, &s.cuts, Tz::UTC);
        assert!(b.is_empty());
        assert_eq!(b.total_pieces, 0);
        assert_eq!(b.total_pay, Decimal::ZERO);
    }

    #[test]
    fn test_no_work_that_day() {
        let s = snapshot();
        let b = breakdown_for_day("e-2", day(11), &s.employees, &s.assignments, &s.cuts, Tz::UTC);
        assert!(b.is_empty());
    }
}
