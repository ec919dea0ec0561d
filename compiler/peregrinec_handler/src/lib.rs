//! Contains the [`Handler`] sinks receiving the violations found while
//! checking declarations.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// Receives the violations reported by a checker, one at a time.
pub trait Handler<T>: Send + Sync {
    /// Receives a violation and handles it.
    fn receive(&self, violation: T);
}

/// Collects every received violation in arrival order.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    violations: Mutex<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { violations: Mutex::new(Vec::new()) } }

    /// Takes out the violations received so far, leaving the storage empty
    /// for the next batch.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.violations.lock())
    }

    /// Consumes the [`Storage`] and returns the received violations.
    pub fn into_vec(self) -> Vec<T> { self.violations.into_inner() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, violation: U) {
        self.violations.lock().push(violation.into());
    }
}

/// Discards every violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _violation: T) {}
}

/// Counts the received violations without keeping them.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of violations received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _violation: T) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Panics on the first violation; for checks expected to pass cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Panic;

impl<T: std::fmt::Debug> Handler<T> for Panic {
    fn receive(&self, violation: T) {
        panic!("{violation:?}");
    }
}

#[cfg(test)]
mod test {
    use super::{Counter, Handler, Storage};

    #[test]
    fn storage_hands_out_batches() {
        let storage: Storage<u64> = Storage::new();

        storage.receive(1u32);
        storage.receive(2u64);
        assert_eq!(storage.take(), vec![1, 2]);

        storage.receive(3u8);
        assert_eq!(storage.into_vec(), vec![3]);
    }

    #[test]
    fn counter_counts() {
        let counter = Counter::default();

        counter.receive("a");
        counter.receive(3);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn panic_handler_panics() {
        super::Panic.receive("boom");
    }
}
