//! Bounded Dynamic Programming

use crate::{
    items::{BoundedItem, KnapsackItem},
    knapsack::Knapsack,
    solution::Solution,
    solvers::{Solver, SolverError, dynamic::DynamicSolver},
};

use super::SolutionTable;

/// Multiple-choice table fill.
///
/// Items are processed in order. For each item the capacity levels are swept
/// from the top down, and at every level each quantity from one up to the
/// available pieces is tried against the lower level it would leave. Sweeping
/// downwards means a level only ever reads lower levels that do not yet contain
/// the current item, so the pieces bound on the quantity is the only way the
/// item can be taken several times.
impl Solver<BoundedItem> for DynamicSolver {
    fn solve(knapsack: &Knapsack<BoundedItem>) -> Result<Solution, SolverError> {
        let capacity = knapsack.capacity();
        let len = knapsack.len();
        let mut table = SolutionTable::new(capacity)?;

        for (index, item) in knapsack.iter().enumerate() {
            let weight = item.weight();
            let pieces = item.pieces().unwrap_or_default();

            for level in (weight..=capacity).rev() {
                let max_units = (level / weight).min(pieces);

                for units in 1..=max_units {
                    let reduced = table.get(level - units * weight)?;

                    let value = units
                        .checked_mul(item.value())
                        .and_then(|value| value.checked_add(reduced.value()))
                        .ok_or(SolverError::Overflow { index })?;

                    if value > table.get(level)?.value() {
                        let improved = reduced.with_units(index, units, item, len)?;

                        table.replace(level, improved)?;
                    }
                }
            }
        }

        table.into_top(len)
    }
}
