//! Stack-safe iteration via trampolining.
//!
//! This module provides the `Trampoline<'a, A>` type for expressing a
//! logically recursive computation as data. Each recursive step is returned
//! to a driving loop instead of being pushed on the call stack, so the
//! number of steps is bounded by time, not by stack size.
//!
//! # Motivation
//!
//! Rust does not guarantee tail call optimization (TCO). A left fold written
//! as `fold(tail, step(head, acc))` would overflow the stack on a long
//! stream. Returning `Trampoline::pending(move || fold(tail, next))` instead
//! moves the iteration count onto the loop inside [`Trampoline::run`].
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::control::Trampoline;
//!
//! fn count_down(n: u64) -> Trampoline<'static, u64> {
//!     if n == 0 {
//!         Trampoline::done(0)
//!     } else {
//!         Trampoline::pending(move || count_down(n - 1))
//!     }
//! }
//!
//! // This would overflow the stack with plain recursion
//! assert_eq!(count_down(1_000_000).run(), 0);
//! ```
//!
//! Driving the loop by hand:
//!
//! ```rust
//! use lazy_stream::control::Trampoline;
//!
//! let mut step = Trampoline::pending(|| Trampoline::pending(|| Trampoline::done("finished")));
//! while !step.is_done() {
//!     step = step.advance();
//! }
//! assert_eq!(step.result(), "finished");
//! ```

use std::fmt;

use super::error::TrampolineError;

/// A single step of a trampolined computation.
///
/// A step is either `Done`, carrying the final value, or `Pending`, carrying
/// a boxed zero-argument function that yields the next step when invoked.
///
/// The lifetime `'a` bounds whatever the pending continuations borrow, so a
/// fold can close over local state without requiring `'static` closures.
///
/// # Contract
///
/// - [`advance`](Self::advance) on a `Done` step is a contract violation.
/// - [`result`](Self::result) on a `Pending` step is a contract violation.
///
/// Both have `try_` forms that return [`TrampolineError`] instead of
/// panicking.
pub enum Trampoline<'a, A> {
    /// The computation has completed with value `A`.
    Done(A),
    /// More work remains; invoking the function produces the next step.
    Pending(Box<dyn FnOnce() -> Trampoline<'a, A> + 'a>),
}

impl<'a, A> Trampoline<'a, A> {
    /// Creates a completed step with the given value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Trampoline;
    ///
    /// assert_eq!(Trampoline::done(42).run(), 42);
    /// ```
    #[inline]
    pub fn done(value: A) -> Self {
        Self::Done(value)
    }

    /// Creates a pending step that continues with the given thunk.
    ///
    /// The thunk is not evaluated until the step is advanced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Trampoline;
    ///
    /// let trampoline = Trampoline::pending(|| Trampoline::done(42));
    /// assert!(!trampoline.is_done());
    /// assert_eq!(trampoline.run(), 42);
    /// ```
    #[inline]
    pub fn pending<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Self + 'a,
    {
        Self::Pending(Box::new(thunk))
    }

    /// Returns `true` if this step carries the final value.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Computes the next step, or reports that there is none.
    ///
    /// # Errors
    ///
    /// Returns [`TrampolineError::AdvanceOnDone`] if this step is `Done`.
    pub fn try_advance(self) -> Result<Self, TrampolineError> {
        match self {
            Self::Done(_) => Err(TrampolineError::AdvanceOnDone),
            Self::Pending(thunk) => Ok(thunk()),
        }
    }

    /// Computes the next step.
    ///
    /// # Panics
    ///
    /// Panics if this step is already `Done`.
    pub fn advance(self) -> Self {
        match self.try_advance() {
            Ok(next) => next,
            Err(error) => panic!("{error}"),
        }
    }

    /// Returns the final value, or reports that work remains.
    ///
    /// # Errors
    ///
    /// Returns [`TrampolineError::ResultOfPending`] if this step is `Pending`.
    pub fn try_result(self) -> Result<A, TrampolineError> {
        match self {
            Self::Done(value) => Ok(value),
            Self::Pending(_) => Err(TrampolineError::ResultOfPending),
        }
    }

    /// Returns the final value.
    ///
    /// # Panics
    ///
    /// Panics if this step is still `Pending`.
    pub fn result(self) -> A {
        match self.try_result() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Runs the trampoline to completion and returns the final value.
    ///
    /// Steps are advanced in a loop, so the stack depth stays constant no
    /// matter how many steps are taken. A computation that never reaches
    /// `Done` never returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Trampoline;
    ///
    /// fn is_even(n: u64) -> Trampoline<'static, bool> {
    ///     if n == 0 {
    ///         Trampoline::done(true)
    ///     } else {
    ///         Trampoline::pending(move || is_odd(n - 1))
    ///     }
    /// }
    ///
    /// fn is_odd(n: u64) -> Trampoline<'static, bool> {
    ///     if n == 0 {
    ///         Trampoline::done(false)
    ///     } else {
    ///         Trampoline::pending(move || is_even(n - 1))
    ///     }
    /// }
    ///
    /// assert!(is_even(100_000).run());
    /// ```
    pub fn run(self) -> A {
        let mut current = self;
        let mut steps: u64 = 0;

        loop {
            match current {
                Self::Done(value) => {
                    log::trace!("trampoline completed after {steps} steps");
                    return value;
                }
                Self::Pending(thunk) => {
                    current = thunk();
                    steps += 1;
                }
            }
        }
    }

    /// Applies a function to the eventual result.
    ///
    /// The function runs once, when the underlying computation reaches
    /// `Done`; wrapping adds no stack depth per step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::Trampoline;
    ///
    /// let doubled = Trampoline::pending(|| Trampoline::done(21)).map(|x| x * 2);
    /// assert_eq!(doubled.run(), 42);
    /// ```
    pub fn map<B, F>(self, function: F) -> Trampoline<'a, B>
    where
        F: FnOnce(A) -> B + 'a,
        A: 'a,
    {
        match self {
            Self::Done(value) => Trampoline::Done(function(value)),
            Self::Pending(thunk) => Trampoline::pending(move || thunk().map(function)),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Trampoline<'_, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(value) => formatter.debug_tuple("Done").field(value).finish(),
            Self::Pending(_) => formatter.debug_tuple("Pending").field(&"<thunk>").finish(),
        }
    }
}
