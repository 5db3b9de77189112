//! Report columns and cell totals

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Cut, Operation};
use std::collections::HashMap;

/// Product label for cuts without a name
pub const NO_PRODUCT: &str = "N/A";

/// Column identity: product, department and rate.
///
/// The same department at two different rates is two columns. `Decimal`
/// hashes by value, so `2.5` and `2.50` are one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnKey {
    pub product: String,
    pub operation: String,
    pub price: Decimal,
}

impl ColumnKey {
    pub fn of(cut: &Cut, operation: &Operation) -> Self {
        Self {
            product: cut.product_name().unwrap_or(NO_PRODUCT).to_string(),
            operation: operation.name.clone(),
            price: operation.price,
        }
    }
}

/// Columns in first-seen order
#[derive(Debug, Default)]
pub struct Columns {
    keys: Vec<ColumnKey>,
    index: HashMap<ColumnKey, usize>,
}

impl Columns {
    /// Position of `key`, appending it when new
    pub fn slot(&mut self, key: ColumnKey) -> usize {
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.keys.len();
        self.index.insert(key.clone(), i);
        self.keys.push(key);
        i
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<ColumnKey> {
        self.keys
    }
}

/// Pieces and pay summed over some assignments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub pieces: i64,
    pub pay: Decimal,
}

impl Tally {
    pub fn add(&mut self, pieces: i64, pay: Decimal) {
        self.pieces += pieces;
        self.pay += pay;
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.add(other.pieces, other.pay);
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Tally::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// Sparse per-column tallies, densified once all columns are known
#[derive(Debug, Default)]
pub(crate) struct Cells(HashMap<usize, Tally>);

impl Cells {
    pub fn add(&mut self, column: usize, pieces: i64, pay: Decimal) {
        self.0.entry(column).or_default().add(pieces, pay);
    }

    /// One entry per column; `None` where nothing was recorded
    pub fn into_row(self, width: usize) -> Vec<Option<Tally>> {
        let mut row = vec![None; width];
        for (column, tally) in self.0 {
            row[column] = Some(tally);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn key(product: &str, op: &str, price: &str) -> ColumnKey {
        ColumnKey {
            product: product.to_string(),
            operation: op.to_string(),
            price: Decimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn test_first_seen_order() {
        let mut columns = Columns::default();
        assert_eq!(columns.slot(key("B", "Singer", "1")), 0);
        assert_eq!(columns.slot(key("A", "Cutting", "2.5")), 1);
        assert_eq!(columns.slot(key("B", "Singer", "1")), 0);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.into_keys()[1].product, "A");
    }

    #[test]
    fn test_price_is_part_of_identity() {
        let mut columns = Columns::default();
        columns.slot(key("A", "Cutting", "2.5"));
        assert_eq!(columns.slot(key("A", "Cutting", "2.50")), 0);
        assert_eq!(columns.slot(key("A", "Cutting", "3")), 1);
    }

    #[test]
    fn test_separator_characters_do_not_collide() {
        let mut columns = Columns::default();
        columns.slot(key("A|B", "C", "1"));
        assert_eq!(columns.slot(key("A", "B|C", "1")), 1);
    }

    #[test]
    fn test_cells_into_row() {
        let mut cells = Cells::default();
        cells.add(2, 10, Decimal::from(25));
        cells.add(2, 5, Decimal::from(5));
        let row = cells.into_row(3);
        assert_eq!(row[0], None);
        assert_eq!(row[2], Some(Tally { pieces: 15, pay: Decimal::from(30) }));
    }

    #[test]
    fn test_tally_sum() {
        let total: Tally = [
            Tally { pieces: 1, pay: Decimal::ONE },
            Tally { pieces: 2, pay: Decimal::TWO },
        ]
        .into_iter()
        .sum();
        assert_eq!(total.pieces, 3);
        assert_eq!(total.pay, Decimal::from(3));
    }
}
