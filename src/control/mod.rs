//! Control structures for lazy, stack-safe evaluation.
//!
//! This module provides the building blocks the [`Stream`](crate::stream::Stream)
//! type is made of:
//!
//! - [`Memo`]: A thread-safe, memoized zero-argument computation
//! - [`ShortCircuit`]: A left-fold step result that may stop the fold early
//! - [`Trampoline`]: Stack-safe iteration driven by an explicit loop
//! - [`TrampolineError`]: Contract violations when driving a trampoline by hand
//!
//! # Examples
//!
//! ## Memoization
//!
//! ```rust
//! use lazy_stream::control::Memo;
//!
//! let memo = Memo::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! assert_eq!(*memo.get(), 42);
//! // Printed exactly once, however many times `get` is called
//! assert_eq!(*memo.get(), 42);
//! ```
//!
//! ## Stack-Safe Recursion
//!
//! ```rust
//! use lazy_stream::control::Trampoline;
//!
//! fn factorial(n: u64, accumulator: u64) -> Trampoline<'static, u64> {
//!     if n <= 1 {
//!         Trampoline::done(accumulator)
//!     } else {
//!         Trampoline::pending(move || factorial(n - 1, n * accumulator))
//!     }
//! }
//!
//! assert_eq!(factorial(10, 1).run(), 3_628_800);
//! ```

mod error;
mod memo;
mod short_circuit;
mod trampoline;

pub use error::TrampolineError;
pub use memo::Memo;
pub use short_circuit::ShortCircuit;
pub use trampoline::Trampoline;
