//! Cut Model (裁床批次)
//!
//! A cut is one production batch of `totalPieces` physical pieces, split into
//! numbered bundles and priced per department operation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-piece rate for one department's work on a cut
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    /// Department name (matches a category)
    pub name: String,
    /// Rate per piece, stored as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Contiguous, 1-indexed, inclusive piece range handed out as one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: String,
    pub bundle_number: u32,
    pub start: i64,
    pub end: i64,
}

impl Bundle {
    /// Number of pieces in the bundle
    #[inline]
    pub fn piece_count(&self) -> i64 {
        self.end - self.start + 1
    }

    #[inline]
    pub fn contains(&self, piece: i64) -> bool {
        (self.start..=self.end).contains(&piece)
    }
}

/// Production batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    pub id: String,
    /// Number printed on the bundle tags
    pub cut_number: String,
    /// Product name; blank names are treated as absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_name: Option<String>,
    pub operations: Vec<Operation>,
    pub total_pieces: i64,
    /// Tiles `1..=total_pieces`, ordered by bundle number
    pub bundles: Vec<Bundle>,
    /// Creation time (Unix millis)
    pub created_at: i64,
}

impl Cut {
    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == operation_id)
    }

    pub fn bundle(&self, bundle_id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.id == bundle_id)
    }

    /// Product name if one was given (blank counts as none)
    pub fn product_name(&self) -> Option<&str> {
        self.cut_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl_id_identity!(Operation, Bundle, Cut);

/// Department rate entered when cutting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OperationRate {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Create cut payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutCreate {
    pub cut_number: String,
    pub cut_name: Option<String>,
    pub total_pieces: i64,
    /// Pieces per bundle; the configured default is used when absent
    pub bundle_size: Option<i64>,
    /// One entry per department; non-positive rates are dropped
    pub rates: Vec<OperationRate>,
}

/// Update cut payload
///
/// Bundles are regenerated only when `total_pieces` changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CutUpdate {
    pub cut_number: Option<String>,
    pub cut_name: Option<String>,
    pub total_pieces: Option<i64>,
    pub bundle_size: Option<i64>,
    pub rates: Option<Vec<OperationRate>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_json() -> &'static str {
        r#"{
            "id": "c-1",
            "cutNumber": "101",
            "cutName": "A-101",
            "operations": [{"id": "op-1", "name": "Cutting", "price": 2.5}],
            "totalPieces": 120,
            "bundles": [
                {"id": "b-1", "bundleNumber": 1, "start": 1, "end": 50},
                {"id": "b-2", "bundleNumber": 2, "start": 51, "end": 100},
                {"id": "b-3", "bundleNumber": 3, "start": 101, "end": 120}
            ],
            "createdAt": 1704844800000
        }"#
    }

    #[test]
    fn test_deserialize_camel_case_with_float_price() {
        let cut: Cut = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(cut.cut_number, "101");
        assert_eq!(cut.product_name(), Some("A-101"));
        assert_eq!(cut.operations[0].price, Decimal::from_str("2.5").unwrap());
        assert_eq!(cut.bundles[2].piece_count(), 20);
        assert_eq!(cut.created_at, 1_704_844_800_000);
    }

    #[test]
    fn test_price_serializes_as_number() {
        let cut: Cut = serde_json::from_str(sample_json()).unwrap();
        let value = serde_json::to_value(&cut).unwrap();
        assert_eq!(value["operations"][0]["price"], serde_json::json!(2.5));
        assert_eq!(value["bundles"][0]["bundleNumber"], serde_json::json!(1));
    }

    #[test]
    fn test_missing_cut_name_is_absent() {
        let json = r#"{"id":"c-2","cutNumber":"7","operations":[],"totalPieces":0,"bundles":[],"createdAt":0}"#;
        let cut: Cut = serde_json::from_str(json).unwrap();
        assert!(cut.cut_name.is_none());
        assert_eq!(cut.product_name(), None);
    }

    #[test]
    fn test_blank_cut_name_is_absent() {
        let mut cut: Cut = serde_json::from_str(sample_json()).unwrap();
        cut.cut_name = Some("  ".to_string());
        assert_eq!(cut.product_name(), None);
    }

    #[test]
    fn test_lookups() {
        let cut: Cut = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(cut.operation("op-1").unwrap().name, "Cutting");
        assert!(cut.operation("op-9").is_none());
        assert_eq!(cut.bundle("b-2").unwrap().bundle_number, 2);
        assert!(cut.bundle("b-9").is_none());
        assert!(cut.bundles[0].contains(50));
        assert!(!cut.bundles[0].contains(51));
    }
}
