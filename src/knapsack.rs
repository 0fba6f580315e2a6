//! Knapsack

use thiserror::Error;
use tracing::debug;

use crate::{
    items::KnapsackItem,
    solution::Solution,
    solvers::{
        Solver, SolverError, Strategy, brute_force::BruteForceSolver, dynamic::DynamicSolver,
    },
};

/// Errors related to knapsack construction or packing.
#[derive(Debug, Error)]
pub enum KnapsackError {
    /// The capacity is zero or negative.
    #[error("knapsack capacity must be greater than zero: {0}")]
    NonPositiveCapacity(i64),

    /// An item has zero weight (index, item name).
    #[error("item {0} ({1}) must have a weight greater than zero")]
    ZeroWeight(usize, String),

    /// Wrapped solver error
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Capacity and items for a single solve.
///
/// Item positions are the identity used by [`Solution::quantities`].
#[derive(Debug, Clone)]
pub struct Knapsack<I> {
    capacity: u64,
    items: Vec<I>,
}

impl<I: KnapsackItem> Knapsack<I> {
    /// Create a new knapsack with the given capacity and items.
    ///
    /// # Errors
    ///
    /// Returns a `KnapsackError` if the capacity is not positive or an item has
    /// zero weight.
    pub fn new(capacity: i64, items: impl Into<Vec<I>>) -> Result<Self, KnapsackError> {
        let capacity = u64::try_from(capacity)
            .ok()
            .filter(|&capacity| capacity > 0)
            .ok_or(KnapsackError::NonPositiveCapacity(capacity))?;

        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            if item.weight() > 0 {
                Ok(())
            } else {
                Err(KnapsackError::ZeroWeight(i, item.name().to_string()))
            }
        })?;

        Ok(Knapsack { capacity, items })
    }

    /// Get the capacity of the knapsack.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Get the items of the knapsack.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Iterate over the items of the knapsack.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.items.iter()
    }

    /// Get the number of items in the knapsack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the knapsack has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pack the knapsack with solver `S`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    pub fn pack<S: Solver<I>>(&self) -> Result<Solution, SolverError> {
        S::solve(self)
    }

    /// Pack the knapsack with the solver selected by `strategy`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    #[tracing::instrument(
        name = "knapsack.pack",
        skip_all,
        fields(%strategy, capacity = self.capacity, items = self.items.len())
    )]
    pub fn pack_with(&self, strategy: Strategy) -> Result<Solution, SolverError>
    where
        BruteForceSolver: Solver<I>,
        DynamicSolver: Solver<I>,
    {
        let solution = match strategy {
            Strategy::BruteForce => self.pack::<BruteForceSolver>(),
            Strategy::Dynamic => self.pack::<DynamicSolver>(),
        }?;

        debug!(
            value = solution.value(),
            weight = solution.weight(),
            "packed knapsack"
        );

        Ok(solution)
    }
}

/// Build a knapsack from `capacity` and `items` and pack it with `strategy`.
///
/// # Errors
///
/// Returns a [`KnapsackError`] if the knapsack is misconfigured, in which case
/// no solving is attempted, or if the solver fails.
pub fn pack<I>(
    capacity: i64,
    items: impl Into<Vec<I>>,
    strategy: Strategy,
) -> Result<Solution, KnapsackError>
where
    I: KnapsackItem,
    BruteForceSolver: Solver<I>,
    DynamicSolver: Solver<I>,
{
    let knapsack = Knapsack::new(capacity, items)?;

    Ok(knapsack.pack_with(strategy)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::{BoundedItem, UnboundedItem};

    use super::*;

    #[test]
    fn new_rejects_zero_capacity() {
        let result = Knapsack::new(0, [BoundedItem::single("a", 1, 1)]);

        assert!(matches!(result, Err(KnapsackError::NonPositiveCapacity(0))));
    }

    #[test]
    fn new_rejects_negative_capacity() {
        let result = Knapsack::<UnboundedItem>::new(-5, []);

        assert!(matches!(
            result,
            Err(KnapsackError::NonPositiveCapacity(-5))
        ));
    }

    #[test]
    fn new_rejects_zero_weight_items() {
        let items = [
            UnboundedItem::new("ok", 1, 1),
            UnboundedItem::new("feather", 0, 5),
        ];

        let result = Knapsack::new(10, items);

        assert!(matches!(
            result,
            Err(KnapsackError::ZeroWeight(1, ref name)) if name == "feather"
        ));
    }

    #[test]
    fn new_keeps_items_in_order() -> TestResult {
        let knapsack = Knapsack::new(
            10,
            vec![BoundedItem::single("a", 1, 1), BoundedItem::single("b", 2, 2)],
        )?;

        let names: Vec<&str> = knapsack.iter().map(KnapsackItem::name).collect();

        assert_eq!(knapsack.capacity(), 10);
        assert_eq!(knapsack.len(), 2);
        assert_eq!(names, vec!["a", "b"]);

        Ok(())
    }

    #[test]
    fn pack_with_empty_items_returns_empty_solution() -> TestResult {
        let solution = pack::<BoundedItem>(5, Vec::new(), Strategy::Dynamic)?;

        assert_eq!(solution, Solution::empty(0));

        Ok(())
    }

    #[test]
    fn pack_rejects_capacity_before_solving() {
        let result = pack(0, [UnboundedItem::new("a", 1, 1)], Strategy::BruteForce);

        assert!(matches!(result, Err(KnapsackError::NonPositiveCapacity(0))));
    }

    #[test]
    fn strategies_agree_on_small_bounded_knapsack() -> TestResult {
        let knapsack = Knapsack::new(
            10,
            [
                BoundedItem::new("a", 3, 4, 2),
                BoundedItem::new("b", 4, 5, 1),
                BoundedItem::new("c", 2, 3, 3),
            ],
        )?;

        let brute = knapsack.pack_with(Strategy::BruteForce)?;
        let dynamic = knapsack.pack_with(Strategy::Dynamic)?;

        assert_eq!(brute.value(), dynamic.value());
        assert_eq!(brute.value(), 14);

        Ok(())
    }
}
