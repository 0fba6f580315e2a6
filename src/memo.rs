//! Solution Memo

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    keylock::{Acquisition, CancelSignal, KeyLock},
    solution::Solution,
};

/// Result of a memo lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memoized {
    /// The solution was already stored under the name.
    Cached(Solution),

    /// The solution was computed by this call and stored.
    Computed(Solution),

    /// The lookup was canceled while waiting for the name; nothing was computed.
    Canceled,
}

impl Memoized {
    /// Get the solution, whether cached or freshly computed.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Memoized::Cached(solution) | Memoized::Computed(solution) => Some(solution),
            Memoized::Canceled => None,
        }
    }
}

/// Solutions shared between callers, keyed by configuration name.
///
/// Every read and write for a name happens while holding that name's lock in a
/// [`KeyLock`], so a solution is computed at most once at a time per name and
/// later callers observe the stored result.
#[derive(Debug, Default)]
pub struct SolutionMemo {
    locks: KeyLock,
    solutions: Mutex<FxHashMap<String, Solution>>,
}

impl SolutionMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the solution stored under `name`, computing and storing it if absent.
    ///
    /// # Errors
    ///
    /// Returns the error of `compute`; nothing is stored in that case.
    pub fn get_or_compute<E>(
        &self,
        name: &str,
        cancel: &CancelSignal,
        compute: impl FnOnce() -> Result<Solution, E>,
    ) -> Result<Memoized, E> {
        let Acquisition::Locked(_guard) = self.locks.lock(name, cancel) else {
            return Ok(Memoized::Canceled);
        };

        if let Some(solution) = self.get(name) {
            debug!(name, "solution memo hit");

            return Ok(Memoized::Cached(solution));
        }

        let solution = compute()?;

        debug!(name, value = solution.value(), "solution memo stored");

        self.solutions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), solution.clone());

        Ok(Memoized::Computed(solution))
    }

    /// Get a copy of the solution stored under `name`.
    pub fn get(&self, name: &str) -> Option<Solution> {
        self.solutions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Get the number of stored solutions.
    pub fn len(&self) -> usize {
        self.solutions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no solution is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
