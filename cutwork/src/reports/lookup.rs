//! Read-time joins
//!
//! Assignments hold foreign keys only. Each aggregation builds one `Lookup`
//! (id maps over the snapshot) and resolves every record through it. A
//! reference that no longer resolves is a value, not an error.

use shared::models::{Assignment, Bundle, Cut, Employee, Operation};
use std::collections::HashMap;

/// Outcome of one id lookup
#[derive(Debug)]
pub enum Resolved<'a, T> {
    Found(&'a T),
    Missing,
}

// Manual impls: a reference is `Copy` whatever `T` is
impl<T> Clone for Resolved<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolved<'_, T> {}

impl<'a, T> Resolved<'a, T> {
    pub fn found(self) -> Option<&'a T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }
}

impl<'a, T> From<Option<&'a T>> for Resolved<'a, T> {
    fn from(value: Option<&'a T>) -> Self {
        value.map_or(Resolved::Missing, Resolved::Found)
    }
}

/// Reference that prevents an assignment from being aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dangling {
    Employee,
    Cut,
    Operation,
}

/// Assignment with every grouping reference resolved.
///
/// The bundle only labels the record, so it may still be missing.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a> {
    pub assignment: &'a Assignment,
    pub employee: &'a Employee,
    pub cut: &'a Cut,
    pub operation: &'a Operation,
    pub bundle: Resolved<'a, Bundle>,
}

impl Joined<'_> {
    pub fn pieces(&self) -> i64 {
        self.assignment.piece_count()
    }

    /// Pay for this record alone, unrounded
    pub fn pay(&self) -> rust_decimal::Decimal {
        shared::money::line_amount(self.pieces(), self.operation.price)
    }

    pub fn bundle_number(&self) -> Option<u32> {
        self.bundle.found().map(|b| b.bundle_number)
    }
}

/// Id maps over one snapshot
pub struct Lookup<'a> {
    employees: HashMap<&'a str, &'a Employee>,
    cuts: HashMap<&'a str, &'a Cut>,
}

impl<'a> Lookup<'a> {
    pub fn new(employees: &'a [Employee], cuts: &'a [Cut]) -> Self {
        Self {
            employees: employees.iter().map(|e| (e.id.as_str(), e)).collect(),
            cuts: cuts.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn employee(&self, id: &str) -> Resolved<'a, Employee> {
        self.employees.get(id).copied().into()
    }

    pub fn cut(&self, id: &str) -> Resolved<'a, Cut> {
        self.cuts.get(id).copied().into()
    }

    pub fn operation(&self, cut_id: &str, operation_id: &str) -> Resolved<'a, Operation> {
        self.cut(cut_id)
            .found()
            .and_then(|cut| cut.operation(operation_id))
            .into()
    }

    pub fn bundle(&self, cut_id: &str, bundle_id: &str) -> Resolved<'a, Bundle> {
        self.cut(cut_id)
            .found()
            .and_then(|cut| cut.bundle(bundle_id))
            .into()
    }

    /// Resolve employee, cut and operation, reporting the first one missing
    pub fn join(&self, assignment: &'a Assignment) -> Result<Joined<'a>, Dangling> {
        let employee = self
            .employee(&assignment.employee_id)
            .found()
            .ok_or(Dangling::Employee)?;
        let cut = self.cut(&assignment.cut_id).found().ok_or(Dangling::Cut)?;
        let operation = cut
            .operation(&assignment.operation_id)
            .ok_or(Dangling::Operation)?;

        Ok(Joined {
            assignment,
            employee,
            cut,
            operation,
            bundle: cut.bundle(&assignment.bundle_id).into(),
        })
    }

    /// Every joinable assignment, in list order
    pub fn joined(&self, assignments: &'a [Assignment]) -> Vec<Joined<'a>> {
        assignments
            .iter()
            .filter_map(|a| match self.join(a) {
                Ok(joined) => Some(joined),
                Err(missing) => {
                    tracing::debug!(assignment_id = %a.id, ?missing, "Skipping dangling assignment");
                    None
                }
            })
            .collect()
    }
}
