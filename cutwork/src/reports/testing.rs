//! Snapshot used by the report tests

use rust_decimal::Decimal;
use shared::models::{Assignment, Bundle, Cut, Employee, Operation};

/// 2024-01-10 00:00 UTC
pub const JAN_10: i64 = 1_704_844_800_000;
/// 2024-01-11 00:00 UTC
pub const JAN_11: i64 = JAN_10 + 86_400_000;
pub const HOUR: i64 = 3_600_000;

pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub cuts: Vec<Cut>,
    pub assignments: Vec<Assignment>,
}

pub fn employee(id: &str, name: &str, role: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
    }
}

fn bundles(prefix: &str, ranges: &[(i64, i64)]) -> Vec<Bundle> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| Bundle {
            id: format!("{}-b{}", prefix, i + 1),
            bundle_number: i as u32 + 1,
            start,
            end,
        })
        .collect()
}

fn operation(id: &str, name: &str, price: Decimal) -> Operation {
    Operation {
        id: id.to_string(),
        name: name.to_string(),
        price,
    }
}

pub fn assignment(
    id: &str,
    employee: &str,
    cut: &str,
    op: &str,
    bundle: &str,
    range: (i64, i64),
    at: i64,
) -> Assignment {
    Assignment {
        id: id.to_string(),
        employee_id: employee.to_string(),
        cut_id: cut.to_string(),
        operation_id: op.to_string(),
        bundle_id: bundle.to_string(),
        start_piece: range.0,
        end_piece: range.1,
        assigned_at: at,
    }
}

/// Two cuts, three workers, two days
///
/// - `c-1` "A-101" #101: 120 pieces in bundles of 50, Cutting 2.5, Singer 1
/// - `c-2` unnamed #7: 40 pieces in bundles of 20, Cutting 3
pub fn snapshot() -> Snapshot {
    let employees = vec![
        employee("e-1", "Asha", "Cutting"),
        employee("e-2", "Ravi", "Singer"),
        employee("e-3", "meena", "Cutting"),
    ];
    let cuts = vec![
        Cut {
            id: "c-1".to_string(),
            cut_number: "101".to_string(),
            cut_name: Some("A-101".to_string()),
            operations: vec![
                operation("c1-cut", "Cutting", Decimal::new(25, 1)),
                operation("c1-sing", "Singer", Decimal::ONE),
            ],
            total_pieces: 120,
            bundles: bundles("c1", &[(1, 50), (51, 100), (101, 120)]),
            created_at: JAN_10,
        },
        Cut {
            id: "c-2".to_string(),
            cut_number: "7".to_string(),
            cut_name: None,
            operations: vec![operation("c2-cut", "Cutting", Decimal::from(3))],
            total_pieces: 40,
            bundles: bundles("c2", &[(1, 20), (21, 40)]),
            created_at: JAN_10,
        },
    ];
    let assignments = vec![
        assignment("a-1", "e-1", "c-1", "c1-cut", "c1-b1", (1, 50), JAN_10 + 9 * HOUR),
        assignment("a-2", "e-2", "c-1", "c1-sing", "c1-b1", (1, 50), JAN_10 + 10 * HOUR),
        assignment("a-3", "e-1", "c-2", "c2-cut", "c2-b1", (1, 20), JAN_11 + 8 * HOUR),
        assignment("a-4", "e-3", "c-1", "c1-cut", "c1-b2", (51, 60), JAN_11 + 9 * HOUR),
        assignment("a-5", "e-1", "c-1", "c1-cut", "c1-b3", (101, 110), JAN_10 + 15 * HOUR),
    ];
    Snapshot {
        employees,
        cuts,
        assignments,
    }
}
