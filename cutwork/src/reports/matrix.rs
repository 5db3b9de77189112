//! Production matrix: employees × (product, department, rate)

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Assignment, Cut, Employee};
use std::collections::HashMap;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::columns::{Cells, ColumnKey, Columns, Tally};
use super::lookup::Lookup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    /// Aligned with [`ProductionMatrix::columns`]
    pub cells: Vec<Option<Tally>>,
    pub total_pieces: i64,
    /// Sum of per-assignment pay
    pub total_pay: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionMatrix {
    /// First-seen order over the assignment list
    pub columns: Vec<ColumnKey>,
    /// Sorted by employee name
    pub rows: Vec<MatrixRow>,
    pub grand_total_pieces: i64,
    pub grand_total_pay: Decimal,
    /// Ids of counted assignments whose range is inverted
    pub inverted: Vec<String>,
}

struct RowBuilder<'a> {
    employee: &'a Employee,
    cells: Cells,
    total: Tally,
}

/// Pivot every joinable assignment into the matrix.
///
/// `role_filter` keeps only employees whose role equals it exactly.
/// Assignments with a missing employee, cut or operation are left out of
/// every total.
pub fn aggregate_matrix(
    employees: &[Employee],
    assignments: &[Assignment],
    cuts: &[Cut],
    role_filter: Option<&str>,
) -> ProductionMatrix {
    let lookup = Lookup::new(employees, cuts);
    let mut columns = Columns::default();
    let mut rows: Vec<RowBuilder> = Vec::new();
    let mut row_index: HashMap<&str, usize> = HashMap::new();
    let mut inverted = Vec::new();

    for joined in lookup.joined(assignments) {
        if role_filter.is_some_and(|role| joined.employee.role != role) {
            continue;
        }

        let column = columns.slot(ColumnKey::of(joined.cut, joined.operation));
        let i = *row_index.entry(joined.employee.id.as_str()).or_insert_with(|| {
            rows.push(RowBuilder {
                employee: joined.employee,
                cells: Cells::default(),
                total: Tally::default(),
            });
            rows.len() - 1
        });

        let (pieces, pay) = (joined.pieces(), joined.pay());
        rows[i].cells.add(column, pieces, pay);
        rows[i].total.add(pieces, pay);

        if joined.assignment.has_inverted_range() {
            tracing::warn!(
                assignment_id = %joined.assignment.id,
                start = joined.assignment.start_piece,
                end = joined.assignment.end_piece,
                "Inverted piece range counted as-is"
            );
            inverted.push(joined.assignment.id.clone());
        }
    }

    let width = columns.len();
    let mut rows: Vec<MatrixRow> = rows
        .into_iter()
        .map(|row| MatrixRow {
            employee_id: row.employee.id.clone(),
            name: row.employee.name.clone(),
            role: row.employee.role.clone(),
            cells: row.cells.into_row(width),
            total_pieces: row.total.pieces,
            total_pay: row.total.pay,
        })
        .collect();
    rows.sort_by(|a, b| by_display_name(&a.name, &a.employee_id, &b.name, &b.employee_id));

    ProductionMatrix {
        columns: columns.into_keys(),
        grand_total_pieces: rows.iter().map(|r| r.total_pieces).sum(),
        grand_total_pay: rows.iter().map(|r| r.total_pay).sum(),
        rows,
        inverted,
    }
}

/// Collation key for a display name: accents stripped, lowercased
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Name order ignoring case and accents, ties broken by exact name then id
pub(crate) fn by_display_name(
    a_name: &str,
    a_id: &str,
    b_name: &str,
    b_id: &str,
) -> std::cmp::Ordering {
    collation_key(a_name)
        .cmp(&collation_key(b_name))
        .then_with(|| a_name.cmp(b_name))
        .then_with(|| a_id.cmp(b_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::*;

    #[test]
    fn test_columns_and_rows() {
        let s = snapshot();
        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);

        let labels: Vec<(&str, &str, String)> = m
            .columns
            .iter()
            .map(|c| (c.product.as_str(), c.operation.as_str(), c.price.to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("A-101", "Cutting", "2.5".to_string()),
                ("A-101", "Singer", "1".to_string()),
                ("N/A", "Cutting", "3".to_string()),
            ]
        );

        let names: Vec<&str> = m.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "meena", "Ravi"]);

        let asha = &m.rows[0];
        assert_eq!(asha.cells[0], Some(Tally { pieces: 60, pay: Decimal::from(150) }));
        assert_eq!(asha.cells[1], None);
        assert_eq!(asha.cells[2], Some(Tally { pieces: 20, pay: Decimal::from(60) }));
        assert_eq!(asha.total_pieces, 80);
        assert_eq!(asha.total_pay, Decimal::from(210));

        assert_eq!(m.grand_total_pieces, 140);
        assert_eq!(m.grand_total_pay, Decimal::from(285));
        assert!(m.inverted.is_empty());
    }

    #[test]
    fn test_role_filter_is_exact() {
        let s = snapshot();
        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, Some("Cutting"));
        let names: Vec<&str> = m.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "meena"]);
        // Filtered-out assignments do not open columns
        assert!(m.columns.iter().all(|c| c.operation == "Cutting"));
        assert_eq!(m.grand_total_pieces, 90);

        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, Some("cutting"));
        assert!(m.rows.is_empty());
        assert!(m.columns.is_empty());
        assert_eq!(m.grand_total_pay, Decimal::ZERO);
    }

    #[test]
    fn test_identical_key_across_cuts_shares_column() {
        let mut s = snapshot();
        s.cuts[1].cut_name = Some("A-101".to_string());
        s.cuts[1].operations[0].price = Decimal::new(25, 1);
        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        // (A-101, Cutting, 2.5) now absorbs c-2
        assert_eq!(m.columns.len(), 2);
        assert_eq!(m.rows[0].cells[0].unwrap().pieces, 80);
    }

    #[test]
    fn test_dangling_references_are_skipped() {
        let mut s = snapshot();
        s.employees.retain(|e| e.id != "e-2");
        s.assignments.push(assignment("a-9", "e-1", "c-gone", "x", "y", (1, 5), JAN_10));
        s.assignments.push(assignment("a-10", "e-1", "c-1", "op-gone", "c1-b1", (1, 5), JAN_10));

        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        assert_eq!(m.rows.len(), 2);
        assert_eq!(m.grand_total_pieces, 90);
        assert_eq!(m.columns.len(), 2);
    }

    #[test]
    fn test_missing_bundle_still_counts() {
        let mut s = snapshot();
        s.assignments[0].bundle_id = "regenerated".to_string();
        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        assert_eq!(m.grand_total_pieces, 140);
    }

    #[test]
    fn test_inverted_range_is_flagged_not_clamped() {
        let mut s = snapshot();
        s.assignments.push(assignment("a-bad", "e-3", "c-1", "c1-cut", "c1-b2", (60, 55), JAN_11));
        let m = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        assert_eq!(m.inverted, vec!["a-bad".to_string()]);
        assert_eq!(m.grand_total_pieces, 140 - 4);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let employees = vec![
            employee("e-z", "Zara", "Cutting"),
            employee("e-e", "Émile", "Cutting"),
            employee("e-a", "Asha", "Cutting"),
            employee("e-l", "emile", "Cutting"),
        ];
        let assignments: Vec<Assignment> = employees
            .iter()
            .map(|e| assignment(&format!("a-{}", e.id), &e.id, "c-1", "c1-cut", "c1-b1", (1, 1), JAN_10))
            .collect();
        let s = snapshot();

        let m = aggregate_matrix(&employees, &assignments, &s.cuts, None);
        let order: Vec<&str> = m.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["Asha", "emile", "Émile", "Zara"]);
    }

    #[test]
    fn test_empty_input() {
        let m = aggregate_matrix(&[], &[], &[], None);
        assert!(m.rows.is_empty());
        assert_eq!(m.grand_total_pieces, 0);
        assert_eq!(m.grand_total_pay, Decimal::ZERO);
    }

    #[test]
    fn test_idempotent() {
        let s = snapshot();
        let first = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        let second = aggregate_matrix(&s.employees, &s.assignments, &s.cuts, None);
        assert_eq!(first, second);
    }
}
