//! Solutions

use crate::{items::KnapsackItem, solvers::SolverError};

/// Packing chosen by a solver.
///
/// `quantities` is indexed like the items of the knapsack it was solved for.
/// Solvers build intermediate solutions lazily: a solution that has not taken
/// anything yet may carry fewer quantities than there are items, with missing
/// entries meaning zero. Solutions returned from a solver are always padded to
/// the full item count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    weight: u64,
    value: u64,
    quantities: Vec<u64>,
}

impl Solution {
    /// Creates a solution that takes nothing from `len` items.
    pub fn empty(len: usize) -> Self {
        Self {
            weight: 0,
            value: 0,
            quantities: vec![0; len],
        }
    }

    /// Total capacity consumed.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Total value achieved.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Units taken of each item, by item index.
    pub fn quantities(&self) -> &[u64] {
        &self.quantities
    }

    /// Units taken of the item at `index`.
    pub fn quantity(&self, index: usize) -> u64 {
        self.quantities.get(index).copied().unwrap_or_default()
    }

    /// Iterate over `(index, units)` of the items that were taken at least once.
    pub fn taken(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.quantities
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, units)| units > 0)
    }

    /// Recompute `(weight, value)` from the quantities and the item catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvariantViolation`] if the quantities do not pair up
    /// with `items`, or [`SolverError::Overflow`] if a total does not fit in `u64`.
    pub fn totals<I: KnapsackItem>(&self, items: &[I]) -> Result<(u64, u64), SolverError> {
        if self.quantities.len() != items.len() {
            return Err(SolverError::InvariantViolation {
                message: "solution quantities do not pair up with knapsack items",
            });
        }

        items.iter().zip(&self.quantities).enumerate().try_fold(
            (0u64, 0u64),
            |(weight, value), (index, (item, &units))| {
                let weight = units
                    .checked_mul(item.weight())
                    .and_then(|w| w.checked_add(weight));

                let value = units
                    .checked_mul(item.value())
                    .and_then(|v| v.checked_add(value));

                weight.zip(value).ok_or(SolverError::Overflow { index })
            },
        )
    }

    /// Copy of this solution with `units` more units of `item` at `index`.
    pub(crate) fn with_units<I: KnapsackItem>(
        &self,
        index: usize,
        units: u64,
        item: &I,
        len: usize,
    ) -> Result<Self, SolverError> {
        let weight = units
            .checked_mul(item.weight())
            .and_then(|w| w.checked_add(self.weight))
            .ok_or(SolverError::Overflow { index })?;

        let value = units
            .checked_mul(item.value())
            .and_then(|v| v.checked_add(self.value))
            .ok_or(SolverError::Overflow { index })?;

        let mut quantities = self.quantities.clone();

        if quantities.len() < len {
            quantities.resize(len, 0);
        }

        let slot = quantities
            .get_mut(index)
            .ok_or(SolverError::InvariantViolation {
                message: "item index outside of solution quantities",
            })?;

        *slot = slot
            .checked_add(units)
            .ok_or(SolverError::Overflow { index })?;

        Ok(Self {
            weight,
            value,
            quantities,
        })
    }

    /// Pad the quantities with zeros up to `len` items.
    pub(crate) fn padded(mut self, len: usize) -> Self {
        if self.quantities.len() < len {
            self.quantities.resize(len, 0);
        }

        self
    }
}
