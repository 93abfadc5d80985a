//! Lazy, memoized, persistent streams.
//!
//! A [`Stream`] is a possibly infinite sequence whose elements and whose
//! successive tails are computed only on demand, and at most once. It is
//! immutable: operations build new streams that share structure with the
//! ones they came from.
//!
//! # Evaluation
//!
//! - Constructors ([`Stream::cons`], [`Stream::unfold`], [`Stream::from`])
//!   run no more than they need to decide whether the stream is empty.
//! - Stream-to-stream operations ([`Stream::map`], [`Stream::take`],
//!   [`Stream::append`], ...) return immediately and do their work as the
//!   result is consumed.
//! - Reductions ([`Stream::to_list`], [`Stream::exists`], [`Stream::sum`],
//!   ...) walk the stream in constant stack space through a
//!   [`Trampoline`](crate::control::Trampoline), stopping early when they
//!   can.
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::stream::Stream;
//!
//! // The naturals, squared, keeping the odd ones
//! let odd_squares = Stream::from(1)
//!     .map(|n| n * n)
//!     .filter(|n| n % 2 == 1)
//!     .take(4);
//!
//! assert_eq!(odd_squares.to_list(), vec![1, 9, 25, 49]);
//! assert_eq!(odd_squares.to_string(), "[1, 9, 25, 49]");
//! ```
//!
//! Memoization is shared by every clone:
//!
//! ```rust
//! use lazy_stream::stream::Stream;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let stream = Stream::cons(move || counter.fetch_add(1, Ordering::SeqCst), Stream::empty);
//! let clone = stream.clone();
//!
//! assert_eq!(stream.head(), Some(&0));
//! assert_eq!(clone.head(), Some(&0));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

mod combinators;
mod fold;
mod generators;
mod iter;
mod node;

pub use fold::Continuation;
pub use iter::Iter;
pub use node::Stream;
