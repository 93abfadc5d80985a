//! Step results for short-circuiting left folds.
//!
//! A left fold feeds each element and the running accumulator to a step
//! function. The step answers with a [`ShortCircuit`]: either keep going
//! with a new accumulator, or stop now with a final value.

/// The outcome of one left-fold step.
///
/// Non-terminal results become the accumulator for the next element.
/// Terminal results end the fold immediately, leaving the rest of the
/// sequence unconsumed.
///
/// # Examples
///
/// ```rust
/// use lazy_stream::control::ShortCircuit;
///
/// let next = ShortCircuit::continue_with(10);
/// assert!(!next.is_terminal());
///
/// let stop = ShortCircuit::stop_with(10);
/// assert!(stop.is_terminal());
/// assert_eq!(stop.into_value(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortCircuit<A> {
    value: A,
    terminal: bool,
}

impl<A> ShortCircuit<A> {
    /// Continue the fold with `value` as the next accumulator.
    #[inline]
    pub const fn continue_with(value: A) -> Self {
        Self {
            value,
            terminal: false,
        }
    }

    /// Stop the fold with `value` as its result.
    #[inline]
    pub const fn stop_with(value: A) -> Self {
        Self {
            value,
            terminal: true,
        }
    }

    /// Returns `true` if the fold should stop.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns a reference to the carried value.
    #[inline]
    pub const fn value(&self) -> &A {
        &self.value
    }

    /// Consumes the result and returns the carried value.
    #[inline]
    pub fn into_value(self) -> A {
        self.value
    }
}

impl ShortCircuit<bool> {
    /// A boolean result that is terminal exactly when it is `true`.
    ///
    /// This is the step shape of "does any element match": keep looking
    /// while the answer is `false`, stop as soon as it becomes `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::ShortCircuit;
    ///
    /// assert!(ShortCircuit::from_flag(true).is_terminal());
    /// assert!(!ShortCircuit::from_flag(false).is_terminal());
    /// ```
    #[inline]
    pub const fn from_flag(flag: bool) -> Self {
        if flag {
            Self::stop_with(flag)
        } else {
            Self::continue_with(flag)
        }
    }
}
