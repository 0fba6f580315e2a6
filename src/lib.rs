//! Knapsack
//!
//! Exact solvers for integer knapsack problems. A [`Knapsack`](knapsack::Knapsack)
//! holds a capacity and a catalog of items; a [`Solver`](solvers::Solver) picks how
//! many units of each item to pack so that the total value is maximal and the
//! total weight fits the capacity.
//!
//! Items are either [`BoundedItem`](items::BoundedItem)s, with a limited number of
//! available pieces, or [`UnboundedItem`](items::UnboundedItem)s, which may be
//! packed any number of times. Both can be solved by memoized brute force or by
//! dynamic programming, and both solvers return the same optimal value.
//!
//! [`SolutionMemo`](memo::SolutionMemo) and [`KeyLock`](keylock::KeyLock) let
//! concurrent callers share one computed solution per configuration name.

pub mod catalog;
pub mod items;
pub mod keylock;
pub mod knapsack;
pub mod memo;
pub mod prelude;
pub mod report;
pub mod solution;
pub mod solvers;
