//! Integration tests for key locking and the shared solution memo.

use std::{
    convert::Infallible,
    sync::{
        Arc, Barrier,
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use testresult::TestResult;

use knapsack::{
    items::UnboundedItem,
    keylock::{CancelSignal, KeyLock},
    knapsack::{Knapsack, KnapsackError},
    memo::{Memoized, SolutionMemo},
    solution::Solution,
    solvers::Strategy,
};

#[test]
fn opposite_key_orders_never_deadlock() {
    let lock = KeyLock::new();
    let cancel = CancelSignal::new();
    let inside = AtomicUsize::new(0);

    thread::scope(|scope| {
        for keys in [["A", "B"], ["B", "A"]] {
            let (lock, cancel, inside) = (&lock, &cancel, &inside);

            scope.spawn(move || {
                for _ in 0..2_000 {
                    let acquisition = lock.lock_keys(&keys, cancel);

                    assert!(!acquisition.is_canceled(), "nothing cancels this signal");
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);

                    inside.fetch_sub(1, Ordering::SeqCst);
                    drop(acquisition);
                }
            });
        }
    });
}

#[test]
fn canceled_acquisition_leaves_keys_free() -> TestResult {
    let lock = KeyLock::new();
    let (sender, receiver) = mpsc::channel();

    let holder = lock
        .lock("C", &CancelSignal::new())
        .into_guard()
        .ok_or("holder was canceled")?;

    let waiter = CancelSignal::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            let acquisition = lock.lock_keys(&["A", "B", "C"], &waiter);
            let _sent = sender.send(acquisition.is_canceled());
        });

        thread::sleep(Duration::from_millis(20));
        waiter.cancel();

        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)).ok(),
            Some(true)
        );
    });

    let others = CancelSignal::new();

    assert!(!lock.lock_keys(&["A", "B"], &others).is_canceled());

    holder.release();

    assert!(!lock.lock_keys(&["A", "B", "C"], &others).is_canceled());

    Ok(())
}

#[test]
fn cancel_only_affects_its_own_waiters() -> TestResult {
    let lock = Arc::new(KeyLock::new());
    let (sender, receiver) = mpsc::channel();

    let holder = lock
        .lock("shared", &CancelSignal::new())
        .into_guard()
        .ok_or("holder was canceled")?;

    let canceled = Arc::new(CancelSignal::new());
    let patient = Arc::new(CancelSignal::new());

    let handles: Vec<_> = [(Arc::clone(&canceled), "canceled"), (Arc::clone(&patient), "patient")]
        .into_iter()
        .map(|(signal, name)| {
            let lock = Arc::clone(&lock);
            let sender = sender.clone();

            thread::spawn(move || {
                let acquisition = lock.lock("shared", &signal);
                let _sent = sender.send((name, acquisition.is_canceled()));
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    canceled.cancel();

    assert_eq!(
        receiver.recv_timeout(Duration::from_secs(5)).ok(),
        Some(("canceled", true))
    );

    holder.release();

    assert_eq!(
        receiver.recv_timeout(Duration::from_secs(5)).ok(),
        Some(("patient", false))
    );

    for handle in handles {
        handle.join().map_err(|_err| "waiter panicked")?;
    }

    Ok(())
}

#[test]
fn memo_computes_each_configuration_once() -> TestResult {
    let memo = SolutionMemo::new();
    let cancel = CancelSignal::new();
    let computed = AtomicUsize::new(0);
    let barrier = Barrier::new(8);

    let items = [
        UnboundedItem::new("2m", 2, 5),
        UnboundedItem::new("3m", 3, 8),
        UnboundedItem::new("6m", 6, 17),
    ];
    let knapsack = Knapsack::new(8, items)?;

    let outcomes: Vec<Result<Memoized, KnapsackError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();

                    memo.get_or_compute("rods", &cancel, || -> Result<Solution, KnapsackError> {
                        computed.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));

                        Ok(knapsack.pack_with(Strategy::Dynamic)?)
                    })
                })
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect()
    });

    assert_eq!(outcomes.len(), 8);
    assert_eq!(computed.load(Ordering::SeqCst), 1);

    let mut fresh = 0;

    for outcome in outcomes {
        let outcome = outcome?;

        if matches!(outcome, Memoized::Computed(_)) {
            fresh += 1;
        }

        assert_eq!(outcome.solution().map(|s| s.value()), Some(22));
    }

    assert_eq!(fresh, 1);

    Ok(())
}

#[test]
fn memo_keeps_configurations_apart() -> TestResult {
    let memo = SolutionMemo::new();
    let cancel = CancelSignal::new();

    for (name, capacity) in [("small", 2), ("large", 8)] {
        let knapsack = Knapsack::new(capacity, [UnboundedItem::new("2m", 2, 5)])?;

        memo.get_or_compute(name, &cancel, || {
            knapsack.pack_with(Strategy::BruteForce).map_err(KnapsackError::from)
        })?;
    }

    let small = memo.get("small").map(|s| s.value());
    let large = memo.get("large").map(|s| s.value());

    assert_eq!(small, Some(5));
    assert_eq!(large, Some(20));
    assert_eq!(memo.len(), 2);

    let cached = memo.get_or_compute("small", &cancel, || -> Result<_, Infallible> {
        Ok(Solution::empty(1))
    })?;

    assert!(matches!(cached, Memoized::Cached(ref s) if s.value() == 5));

    Ok(())
}
