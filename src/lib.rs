//! # lazy-stream
//!
//! Lazy, memoized, persistent streams for Rust, together with the small
//! control structures they are built from.
//!
//! ## Overview
//!
//! - **Streams**: [`Stream`](stream::Stream), a possibly infinite sequence
//!   whose heads and tails are computed on demand and cached
//! - **Control Structures**: [`Memo`](control::Memo) for thread-safe
//!   memoization, [`Trampoline`](control::Trampoline) for stack-safe
//!   iteration, [`ShortCircuit`](control::ShortCircuit) for early-exit folds
//!
//! ## Feature Flags
//!
//! - `control`: Control structures (Memo, Trampoline, `ShortCircuit`)
//! - `stream`: Lazy streams (implies `control`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_stream::prelude::*;
//!
//! let fizz = Stream::from(1)
//!     .map(|n| if n % 3 == 0 { "fizz".to_string() } else { n.to_string() })
//!     .take(4);
//! assert_eq!(fizz.to_list(), vec!["1", "2", "fizz", "4"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use lazy_stream::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "stream")]
pub mod stream;
