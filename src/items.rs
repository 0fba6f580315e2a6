//! Items

use serde::{Deserialize, Serialize};

/// An item that can be packed into a knapsack.
///
/// Implementors describe one catalog entry: how much capacity a single unit
/// consumes, what a single unit is worth, and how many units may be taken.
pub trait KnapsackItem {
    /// Name used to attribute quantities in a solution.
    fn name(&self) -> &str;

    /// Capacity consumed by one unit.
    fn weight(&self) -> u64;

    /// Value gained by one unit.
    fn value(&self) -> u64;

    /// Maximum number of units that may be packed, `None` when unlimited.
    fn pieces(&self) -> Option<u64>;
}

fn default_pieces() -> u64 {
    1
}

/// Item with a limited number of available pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedItem {
    #[serde(rename = "item")]
    name: String,
    weight: u64,
    value: u64,
    #[serde(default = "default_pieces")]
    pieces: u64,
}

impl BoundedItem {
    /// Creates a new item with the given number of available pieces.
    pub fn new(name: impl Into<String>, weight: u64, value: u64, pieces: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            pieces,
        }
    }

    /// Creates a new item of which a single piece is available.
    pub fn single(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self::new(name, weight, value, default_pieces())
    }
}

impl KnapsackItem for BoundedItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u64 {
        self.weight
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn pieces(&self) -> Option<u64> {
        Some(self.pieces)
    }
}

/// Item that may be packed any number of times.
///
/// A `pieces` key in a catalog record is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnboundedItem {
    #[serde(rename = "item")]
    name: String,
    weight: u64,
    value: u64,
}

impl UnboundedItem {
    /// Creates a new item that may be packed any number of times.
    pub fn new(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }
}

impl KnapsackItem for UnboundedItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u64 {
        self.weight
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn pieces(&self) -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bounded_item_parses_all_fields() -> TestResult {
        let item: BoundedItem = serde_norway::from_str(
            "
item: FXIP
weight: 66
value: 66
pieces: 481
",
        )?;

        assert_eq!(item, BoundedItem::new("FXIP", 66, 66, 481));

        Ok(())
    }

    #[test]
    fn bounded_item_defaults_to_one_piece() -> TestResult {
        let item: BoundedItem = serde_norway::from_str(
            "
item: Tree
weight: 10
value: 1
",
        )?;

        assert_eq!(item, BoundedItem::single("Tree", 10, 1));
        assert_eq!(item.pieces(), Some(1));

        Ok(())
    }

    #[test]
    fn bounded_item_serializes_pieces() -> TestResult {
        let yaml = serde_norway::to_string(&BoundedItem::new("FXIP", 66, 66, 481))?;

        assert_eq!(yaml, "item: FXIP\nweight: 66\nvalue: 66\npieces: 481\n");

        Ok(())
    }

    #[test]
    fn unbounded_item_ignores_pieces() -> TestResult {
        let item: UnboundedItem = serde_norway::from_str(
            "
item: 1m
weight: 1
value: 1
pieces: 3
",
        )?;

        assert_eq!(item, UnboundedItem::new("1m", 1, 1));
        assert_eq!(item.pieces(), None);

        Ok(())
    }

    #[test]
    fn unbounded_item_serializes_without_pieces() -> TestResult {
        let yaml = serde_norway::to_string(&UnboundedItem::new("1m", 1, 1))?;

        assert_eq!(yaml, "item: 1m\nweight: 1\nvalue: 1\n");

        Ok(())
    }
}
