//! Dynamic Programming Solver

use crate::{solution::Solution, solvers::SolverError};

pub mod bounded;
pub mod unbounded;

/// Solver filling a table of best partial solutions for every capacity level.
///
/// Implemented for [`BoundedItem`](crate::items::BoundedItem) knapsacks, where
/// each item may be taken up to its available pieces, and for
/// [`UnboundedItem`](crate::items::UnboundedItem) knapsacks, where items may be
/// repeated freely. Both run in `O(capacity * items)` table updates (times the
/// pieces of an item for the bounded variant).
#[derive(Debug)]
pub struct DynamicSolver;

/// Best solution found so far for each capacity level `0..=capacity`.
#[derive(Debug)]
struct SolutionTable {
    levels: Vec<Solution>,
}

impl SolutionTable {
    /// Allocate one empty level per unit of capacity, failing instead of aborting
    /// when the table does not fit in memory.
    fn new(capacity: u64) -> Result<Self, SolverError> {
        let len = usize::try_from(capacity)
            .ok()
            .and_then(|capacity| capacity.checked_add(1))
            .ok_or(SolverError::CapacityTooLarge(capacity))?;

        let mut levels = Vec::new();

        levels
            .try_reserve_exact(len)
            .map_err(|_err| SolverError::CapacityTooLarge(capacity))?;
        levels.resize(len, Solution::default());

        Ok(SolutionTable { levels })
    }

    fn get(&self, level: u64) -> Result<&Solution, SolverError> {
        usize::try_from(level)
            .ok()
            .and_then(|level| self.levels.get(level))
            .ok_or(SolverError::InvariantViolation {
                message: "capacity level outside of solution table",
            })
    }

    fn replace(&mut self, level: u64, solution: Solution) -> Result<(), SolverError> {
        let slot = usize::try_from(level)
            .ok()
            .and_then(|level| self.levels.get_mut(level))
            .ok_or(SolverError::InvariantViolation {
                message: "capacity level outside of solution table",
            })?;

        *slot = solution;

        Ok(())
    }

    /// Solution for the full capacity, padded to `len` items.
    fn into_top(mut self, len: usize) -> Result<Solution, SolverError> {
        self.levels
            .pop()
            .map(|solution| solution.padded(len))
            .ok_or(SolverError::InvariantViolation {
                message: "solution table is empty",
            })
    }
}
