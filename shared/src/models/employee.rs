//! Employee Model (工人)

use serde::{Deserialize, Serialize};

/// A worker paid per piece
///
/// `role` is the department label (a category name). Equality is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Department label, compared against operation names
    pub role: String,
}

impl_id_identity!(Employee);

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    /// Department; falls back to the first category when absent
    pub role: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
}
