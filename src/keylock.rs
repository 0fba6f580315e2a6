//! Key Lock
//!
//! Mutual exclusion over arbitrary string keys. Any number of keys can be locked
//! at once; [`KeyLock::lock_keys`] always acquires them in sorted order, so two
//! callers locking overlapping key sets can never wait on each other in a
//! cycle. A pending acquisition can be abandoned through a [`CancelSignal`].

use std::sync::{
    Arc, Condvar, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

type Slots = SmallVec<[(String, Arc<KeySlot>); 4]>;

/// Binary lock for one key.
#[derive(Debug, Default)]
struct KeySlot {
    held: Mutex<bool>,
    released: Condvar,
}

impl KeySlot {
    fn held(&self) -> MutexGuard<'_, bool> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the slot is free and take it, unless `cancel` fires first.
    ///
    /// Returns `false` if the acquisition was canceled.
    fn acquire(self: &Arc<Self>, cancel: &CancelSignal) -> bool {
        cancel.register(self);

        let mut held = self.held();

        let acquired = loop {
            if cancel.is_canceled() {
                break false;
            }

            if !*held {
                *held = true;
                break true;
            }

            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        };

        drop(held);
        cancel.deregister(self);

        acquired
    }

    fn release(&self) {
        *self.held() = false;

        // Waiters woken by a cancellation leave without taking the slot, so every
        // waiter must get a chance to observe the release.
        self.released.notify_all();
    }

    /// Wake waiters so they re-check their cancel signal.
    fn wake(&self) {
        let _held = self.held();
        self.released.notify_all();
    }
}

/// Signal used to abandon pending [`KeyLock`] acquisitions.
///
/// Once canceled a signal stays canceled; every acquisition waiting on it, now
/// or later, returns [`Acquisition::Canceled`].
#[derive(Debug, Default)]
pub struct CancelSignal {
    canceled: AtomicBool,
    waiting: Mutex<SmallVec<[Arc<KeySlot>; 4]>>,
}

impl CancelSignal {
    /// Create a signal that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal, waking every acquisition blocked on it.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);

        let waiting = self
            .waiting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for slot in waiting {
            slot.wake();
        }
    }

    /// Check whether the signal has fired.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    fn register(&self, slot: &Arc<KeySlot>) {
        self.waiting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(slot));
    }

    fn deregister(&self, slot: &Arc<KeySlot>) {
        let mut waiting = self.waiting.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(position) = waiting.iter().position(|w| Arc::ptr_eq(w, slot)) {
            waiting.swap_remove(position);
        }
    }
}

/// Outcome of a [`KeyLock`] acquisition.
#[derive(Debug)]
#[must_use = "dropping an acquisition releases its keys immediately"]
pub enum Acquisition {
    /// Every requested key is held until the guard is released or dropped.
    Locked(KeyLockGuard),

    /// The signal fired before every key was acquired; no key is held.
    Canceled,
}

impl Acquisition {
    /// Check whether the acquisition was canceled.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Acquisition::Canceled)
    }

    /// Get the guard of a successful acquisition.
    pub fn into_guard(self) -> Option<KeyLockGuard> {
        match self {
            Acquisition::Locked(guard) => Some(guard),
            Acquisition::Canceled => None,
        }
    }
}

/// Keys held by a successful acquisition.
///
/// Keys are released in reverse acquisition order, exactly once, when the guard
/// is released or dropped.
#[derive(Debug)]
#[must_use = "dropping the guard releases its keys immediately"]
pub struct KeyLockGuard {
    slots: Slots,
}

impl KeyLockGuard {
    /// Keys held by this guard, in acquisition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(key, _)| key.as_str())
    }

    /// Release every held key.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for KeyLockGuard {
    fn drop(&mut self) {
        for (key, slot) in self.slots.iter().rev() {
            slot.release();

            trace!(%key, "released key");
        }
    }
}

/// Mutual exclusion over string keys.
///
/// A lock is created for a key the first time it is requested and kept for
/// the lifetime of the `KeyLock`.
#[derive(Debug, Default)]
pub struct KeyLock {
    slots: Mutex<FxHashMap<String, Arc<KeySlot>>>,
}

impl KeyLock {
    /// Create a key lock with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a single key.
    pub fn lock(&self, key: &str, cancel: &CancelSignal) -> Acquisition {
        self.lock_keys(&[key], cancel)
    }

    /// Lock every key in `keys`, blocking until all are held or `cancel` fires.
    ///
    /// Keys are sorted and deduplicated before acquisition. If the signal fires
    /// part way through, the keys acquired so far are released in reverse order
    /// and [`Acquisition::Canceled`] is returned.
    pub fn lock_keys<K: AsRef<str>>(&self, keys: &[K], cancel: &CancelSignal) -> Acquisition {
        let mut sorted: SmallVec<[&str; 4]> = keys.iter().map(|key| key.as_ref()).collect();

        sorted.sort_unstable();
        sorted.dedup();

        let slots = self.slots_for(&sorted);
        let mut guard = KeyLockGuard {
            slots: SmallVec::with_capacity(slots.len()),
        };

        for (key, slot) in slots {
            if !slot.acquire(cancel) {
                trace!(%key, held = guard.slots.len(), "key acquisition canceled");

                drop(guard);

                return Acquisition::Canceled;
            }

            trace!(%key, "acquired key");

            guard.slots.push((key, slot));
        }

        Acquisition::Locked(guard)
    }

    fn slots_for(&self, keys: &[&str]) -> Slots {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        keys.iter()
            .map(|&key| {
                let slot = slots.entry(key.to_string()).or_default();

                (key.to_string(), Arc::clone(slot))
            })
            .collect()
    }
}
