//! Knapsack prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::CatalogError,
    items::{BoundedItem, KnapsackItem, UnboundedItem},
    keylock::{Acquisition, CancelSignal, KeyLock, KeyLockGuard},
    knapsack::{Knapsack, KnapsackError, pack},
    memo::{Memoized, SolutionMemo},
    report::{Report, ReportError},
    solution::Solution,
    solvers::{
        Solver, SolverError, Strategy, brute_force::BruteForceSolver, dynamic::DynamicSolver,
    },
};
