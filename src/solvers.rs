//! Solvers for Knapsacks

use std::fmt;

use thiserror::Error;

use crate::{items::KnapsackItem, knapsack::Knapsack, solution::Solution};

pub mod brute_force;
pub mod dynamic;

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// A weight, value or quantity total does not fit in `u64`.
    #[error("totals overflowed while packing item {index}")]
    Overflow {
        /// Index of the item being packed when the overflow occurred
        index: usize,
    },

    /// The capacity is too large to index a table of partial solutions.
    #[error("knapsack capacity {0} cannot be addressed by the solution table")]
    CapacityTooLarge(u64),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Trait for solving a knapsack of items of kind `I`.
///
/// Solvers are stateless: the knapsack is borrowed for the duration of one
/// call and any working memory is dropped before returning.
pub trait Solver<I: KnapsackItem> {
    /// Find a packing of maximum value for the given knapsack.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve(knapsack: &Knapsack<I>) -> Result<Solution, SolverError>;
}

/// Solving strategy selected by a caller.
///
/// Bounded or unbounded behaviour follows from the item kind of the knapsack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Memoized exhaustive search, see [`brute_force::BruteForceSolver`].
    BruteForce,

    /// Bottom-up dynamic programming, see [`dynamic::DynamicSolver`].
    #[default]
    Dynamic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BruteForce => f.write_str("brute-force"),
            Strategy::Dynamic => f.write_str("dynamic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn strategy_names_match_display() {
        for strategy in Strategy::value_variants() {
            let name = strategy
                .to_possible_value()
                .map(|value| value.get_name().to_string());

            assert_eq!(name, Some(strategy.to_string()));
        }
    }

    #[test]
    fn strategy_defaults_to_dynamic() {
        assert_eq!(Strategy::default(), Strategy::Dynamic);
    }
}
