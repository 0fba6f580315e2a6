//! Unbounded Dynamic Programming

use crate::{
    items::{KnapsackItem, UnboundedItem},
    knapsack::Knapsack,
    solution::Solution,
    solvers::{Solver, SolverError, dynamic::DynamicSolver},
};

use super::SolutionTable;

/// Single-unit table fill with reuse.
///
/// Each level tries one more unit of the current item on top of the level one
/// item weight below. Levels are swept upwards, so that lower level may already
/// hold units of the same item from this pass, which is how repeated units
/// accumulate.
impl Solver<UnboundedItem> for DynamicSolver {
    fn solve(knapsack: &Knapsack<UnboundedItem>) -> Result<Solution, SolverError> {
        let capacity = knapsack.capacity();
        let len = knapsack.len();
        let mut table = SolutionTable::new(capacity)?;

        for (index, item) in knapsack.iter().enumerate() {
            let weight = item.weight();

            for level in weight..=capacity {
                let reduced = table.get(level - weight)?;

                let value = reduced
                    .value()
                    .checked_add(item.value())
                    .ok_or(SolverError::Overflow { index })?;

                if value > table.get(level)?.value() {
                    let improved = reduced.with_units(index, 1, item, len)?;

                    table.replace(level, improved)?;
                }
            }
        }

        table.into_top(len)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn repeats_items() -> TestResult {
        let knapsack = Knapsack::new(9, [UnboundedItem::new("small", 3, 5)])?;

        let solution = knapsack.pack::<DynamicSolver>()?;

        assert_eq!(solution.quantities(), &[3]);
        assert_eq!(solution.value(), 15);
        assert_eq!(solution.weight(), 9);

        Ok(())
    }

    #[test]
    fn mixes_repeated_items() -> TestResult {
        let knapsack = Knapsack::new(
            11,
            [UnboundedItem::new("three", 3, 4), UnboundedItem::new("five", 5, 7)],
        )?;

        let solution = knapsack.pack::<DynamicSolver>()?;

        // 3 + 3 + 5 = 11 -> 4 + 4 + 7 = 15, beats 5 + 5 = 10 -> 14.
        assert_eq!(solution.quantities(), &[2, 1]);
        assert_eq!(solution.value(), 15);
        assert_eq!(solution.weight(), 11);

        Ok(())
    }

    #[test]
    fn ties_keep_first_improvement() -> TestResult {
        let knapsack = Knapsack::new(
            4,
            [UnboundedItem::new("a", 2, 2), UnboundedItem::new("b", 2, 2)],
        )?;

        let solution = knapsack.pack::<DynamicSolver>()?;

        assert_eq!(solution.quantities(), &[2, 0]);
        assert_eq!(solution.value(), 4);

        Ok(())
    }

    #[test]
    fn item_heavier_than_capacity_is_skipped() -> TestResult {
        let knapsack = Knapsack::new(4, [UnboundedItem::new("boulder", 5, 100)])?;

        let solution = knapsack.pack::<DynamicSolver>()?;

        assert_eq!(solution, Solution::empty(1));

        Ok(())
    }
}
