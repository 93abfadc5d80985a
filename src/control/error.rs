//! Error types for the control structures.
//!
//! Driving a [`Trampoline`](super::Trampoline) by hand exposes two ways to
//! misuse it: advancing a step that has already finished, and reading the
//! result of a step that still has work to do. Both are programmer errors.
//! The `try_*` methods report them as [`TrampolineError`]; the plain methods
//! panic with the same message.

use std::fmt;

/// A contract violation while driving a trampoline step by step.
///
/// # Examples
///
/// ```rust
/// use lazy_stream::control::{Trampoline, TrampolineError};
///
/// let error = Trampoline::done(42).try_advance().unwrap_err();
/// assert_eq!(error, TrampolineError::AdvanceOnDone);
/// assert_eq!(
///     format!("{error}"),
///     "Trampoline::advance: the computation is already done"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrampolineError {
    /// `advance` was called on a `Done` step.
    AdvanceOnDone,
    /// `result` was called on a `Pending` step.
    ResultOfPending,
}

impl TrampolineError {
    /// The name of the operation that was misused.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::AdvanceOnDone => "advance",
            Self::ResultOfPending => "result",
        }
    }
}

impl fmt::Display for TrampolineError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdvanceOnDone => write!(
                formatter,
                "Trampoline::{}: the computation is already done",
                self.operation()
            ),
            Self::ResultOfPending => write!(
                formatter,
                "Trampoline::{}: the computation is still pending",
                self.operation()
            ),
        }
    }
}

impl std::error::Error for TrampolineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        TrampolineError::AdvanceOnDone,
        "Trampoline::advance: the computation is already done"
    )]
    #[case(
        TrampolineError::ResultOfPending,
        "Trampoline::result: the computation is still pending"
    )]
    fn test_trampoline_error_display(#[case] error: TrampolineError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_trampoline_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(TrampolineError::ResultOfPending);
        assert!(error.source().is_none());
    }

    #[rstest]
    fn test_trampoline_error_equality() {
        assert_eq!(TrampolineError::AdvanceOnDone, TrampolineError::AdvanceOnDone);
        assert_ne!(TrampolineError::AdvanceOnDone, TrampolineError::ResultOfPending);
    }
}
