//! Thread-safe memoization of zero-argument computations.
//!
//! This module provides [`Memo<T>`], a shareable handle to a computation
//! that runs at most once successfully. The first caller of [`Memo::get`]
//! runs it; every later caller, on any thread, receives a reference to the
//! same cached value.
//!
//! # Concurrency
//!
//! The first run happens under an exclusive lock, so concurrent first
//! callers wait for the winner and then observe its value. Once the value
//! is cached, reads are lock-free.
//!
//! # Failure
//!
//! A panic inside the computation is not cached. It propagates to the
//! caller, the lock is released, and the next `get` runs the computation
//! again.
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::control::Memo;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let memo = Memo::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     "computed".to_string()
//! });
//!
//! assert_eq!(calls.load(Ordering::SeqCst), 0);
//! assert_eq!(memo.get(), "computed");
//! assert_eq!(memo.get(), "computed");
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

type Computation<T> = Box<dyn Fn() -> T + Send + Sync>;

struct Slot<T> {
    /// Set exactly once, by the caller holding `computation`'s lock.
    value: OnceLock<T>,
    /// `Some` until `value` is set, then released.
    computation: Mutex<Option<Computation<T>>>,
    attempts: AtomicUsize,
}

/// A memoized zero-argument computation.
///
/// Cloning a `Memo` shares the cache: every clone observes the value
/// produced by whichever clone was forced first.
///
/// `Memo<T>` is `Send` and `Sync` whenever `T` is.
pub struct Memo<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Memo<T> {
    /// Wraps a computation without running it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Memo;
    ///
    /// let memo = Memo::new(|| 6 * 7);
    /// assert!(!memo.is_evaluated());
    /// assert_eq!(*memo.get(), 42);
    /// ```
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            slot: Arc::new(Slot {
                value: OnceLock::new(),
                computation: Mutex::new(Some(Box::new(computation))),
                attempts: AtomicUsize::new(0),
            }),
        }
    }

    /// Creates a memo whose value is already cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Memo;
    ///
    /// let memo = Memo::evaluated(42);
    /// assert!(memo.is_evaluated());
    /// ```
    pub fn evaluated(value: T) -> Self {
        Self {
            slot: Arc::new(Slot {
                value: OnceLock::from(value),
                computation: Mutex::new(None),
                attempts: AtomicUsize::new(0),
            }),
        }
    }

    /// Returns the cached value, running the computation on first access.
    ///
    /// # Panics
    ///
    /// Propagates a panic from the computation. The value stays uncached and
    /// a later call retries.
    pub fn get(&self) -> &T {
        match self.slot.value.get() {
            Some(value) => value,
            None => self.initialize(),
        }
    }

    /// Returns the cached value without forcing the computation.
    #[inline]
    pub fn get_if_evaluated(&self) -> Option<&T> {
        self.slot.value.get()
    }

    /// Returns whether the value has been computed and cached.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.slot.value.get().is_some()
    }

    /// Returns `true` if both handles share one cache.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    /// Takes the cached value out if this handle is the only one left.
    ///
    /// Used to unlink long chains of memoized values without recursion.
    pub(crate) fn take_if_unique(&mut self) -> Option<T> {
        Arc::get_mut(&mut self.slot).and_then(|slot| slot.value.take())
    }

    fn initialize(&self) -> &T {
        let mut computation = self.slot.computation.lock();

        if let Some(value) = self.slot.value.get() {
            return value;
        }

        let value = match computation.as_ref() {
            Some(function) => {
                let attempt = self.slot.attempts.fetch_add(1, Ordering::Relaxed);
                if attempt > 0 {
                    log::debug!("re-running memoized computation after {attempt} panicked attempt(s)");
                }
                function()
            }
            None => unreachable!("memoized computation released before its value was cached"),
        };

        let cached = self.slot.value.get_or_init(|| value);
        *computation = None;
        cached
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

static_assertions::assert_impl_all!(Memo<i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(Memo<std::cell::Cell<i32>>: Sync);

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.value.get() {
            Some(value) => formatter.debug_tuple("Memo").field(value).finish(),
            None => formatter
                .debug_tuple("Memo")
                .field(&format_args!("<unevaluated>"))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn counting(calls: &Arc<AtomicUsize>) -> Memo<usize> {
        let calls = Arc::clone(calls);
        Memo::new(move || calls.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[rstest]
    fn test_memo_defers_computation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = counting(&calls);

        assert!(!memo.is_evaluated());
        assert_eq!(memo.get_if_evaluated(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn test_memo_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = counting(&calls);

        assert_eq!(*memo.get(), 1);
        assert_eq!(*memo.get(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.get_if_evaluated(), Some(&1));
    }

    #[rstest]
    fn test_memo_clones_share_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = counting(&calls);
        let clone = memo.clone();

        assert!(memo.ptr_eq(&clone));
        assert_eq!(*clone.get(), 1);
        assert!(memo.is_evaluated());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_memo_retries_after_panic() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Memo::new(move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            assert!(call > 0, "first attempt fails");
            call
        });

        let first = catch_unwind(AssertUnwindSafe(|| *memo.get()));
        assert!(first.is_err());
        assert!(!memo.is_evaluated());

        assert_eq!(*memo.get(), 1);
        assert_eq!(*memo.get(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    fn test_memo_take_if_unique() {
        let mut memo = Memo::evaluated(5);
        let shared = memo.clone();
        assert_eq!(memo.take_if_unique(), None);

        drop(shared);
        assert_eq!(memo.take_if_unique(), Some(5));
    }

    #[rstest]
    fn test_memo_debug() {
        let memo = Memo::new(|| 42);
        assert_eq!(format!("{memo:?}"), "Memo(<unevaluated>)");
        let _ = memo.get();
        assert_eq!(format!("{memo:?}"), "Memo(42)");
    }
}
