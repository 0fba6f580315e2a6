//! Brute Force Solver

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    items::KnapsackItem,
    knapsack::Knapsack,
    solution::Solution,
    solvers::{Solver, SolverError},
};

/// Solver that enumerates every feasible quantity of every item.
///
/// The search works from the last item towards the first. For an item it tries
/// each quantity from zero up to what fits (and, for bounded items, up to the
/// available pieces) and combines it with the best packing of the remaining
/// capacity into the items before it. Subproblems are memoized by
/// `(remaining capacity, item position)`, so at most `capacity * items`
/// distinct subproblems are ever solved. They are resolved from an explicit
/// work stack, so catalogs of any length can be searched.
///
/// On equal values the lowest quantity of the later item wins, as quantities are
/// tried in increasing order and only a strictly better value replaces the best.
#[derive(Debug)]
pub struct BruteForceSolver;

impl<I: KnapsackItem> Solver<I> for BruteForceSolver {
    fn solve(knapsack: &Knapsack<I>) -> Result<Solution, SolverError> {
        let mut search = Search {
            items: knapsack.items(),
            memo: FxHashMap::default(),
            empty: Rc::default(),
        };

        let best = search.run(knapsack.capacity())?;

        trace!(subproblems = search.memo.len(), "brute force search finished");

        Ok(Rc::unwrap_or_clone(best).padded(knapsack.len()))
    }
}

/// Memo key: remaining capacity and the position of the last item still considered.
type Subproblem = (u64, usize);

/// Pending work: remaining capacity and the number of leading items to pack into it.
type Frame = (u64, usize);

struct Search<'a, I> {
    items: &'a [I],
    memo: FxHashMap<Subproblem, Rc<Solution>>,
    empty: Rc<Solution>,
}

impl<I: KnapsackItem> Search<'_, I> {
    /// Best packing of every item into `capacity`.
    ///
    /// A frame stays on the stack until every subproblem it depends on is known,
    /// then it is resolved and popped.
    fn run(&mut self, capacity: u64) -> Result<Rc<Solution>, SolverError> {
        let len = self.items.len();
        let mut pending: Vec<Frame> = vec![(capacity, len)];

        while let Some(&(remaining, count)) = pending.last() {
            let Some(position) = count.checked_sub(1) else {
                pending.pop();
                continue;
            };

            if self.known(remaining, count).is_some() {
                pending.pop();
                continue;
            }

            let (weight, max_units) = self.units(remaining, position)?;
            let waiting = pending.len();

            for units in 0..=max_units {
                let rest = remaining - units * weight;

                if self.known(rest, position).is_none() {
                    pending.push((rest, position));
                }
            }

            if pending.len() == waiting {
                self.resolve(remaining, position)?;
                pending.pop();
            }
        }

        self.known(capacity, len)
            .ok_or(SolverError::InvariantViolation {
                message: "search finished without packing every item",
            })
    }

    /// Best packing of the first `count` items into `remaining`, if already solved.
    fn known(&self, remaining: u64, count: usize) -> Option<Rc<Solution>> {
        match count.checked_sub(1) {
            Some(position) if remaining > 0 => self.memo.get(&(remaining, position)).cloned(),
            _ => Some(Rc::clone(&self.empty)),
        }
    }

    fn item(&self, position: usize) -> Result<&I, SolverError> {
        self.items
            .get(position)
            .ok_or(SolverError::InvariantViolation {
                message: "item position outside of knapsack items",
            })
    }

    /// Weight of the item at `position` and how many of its units fit into `remaining`.
    fn units(&self, remaining: u64, position: usize) -> Result<(u64, u64), SolverError> {
        let item = self.item(position)?;
        let weight = item.weight();

        let fits = remaining
            .checked_div(weight)
            .ok_or(SolverError::InvariantViolation {
                message: "item weight must be greater than zero",
            })?;

        Ok((weight, item.pieces().map_or(fits, |pieces| fits.min(pieces))))
    }

    /// Solve `(remaining, position)` from the already known packings of the items before it.
    fn resolve(&mut self, remaining: u64, position: usize) -> Result<(), SolverError> {
        let (weight, max_units) = self.units(remaining, position)?;
        let item = self.item(position)?;

        let mut best = Rc::clone(&self.empty);
        let mut best_units = 0;
        let mut best_value = 0;

        for units in 0..=max_units {
            let rest = self
                .known(remaining - units * weight, position)
                .ok_or(SolverError::InvariantViolation {
                    message: "subproblem resolved before its dependencies",
                })?;

            let value = units
                .checked_mul(item.value())
                .and_then(|value| value.checked_add(rest.value()))
                .ok_or(SolverError::Overflow { index: position })?;

            if value > best_value {
                best = rest;
                best_units = units;
                best_value = value;
            }
        }

        if best_units > 0 {
            best = Rc::new(best.with_units(position, best_units, item, self.items.len())?);
        }

        self.memo.insert((remaining, position), best);

        Ok(())
    }
}
