//! Corecursive stream constructors.
//!
//! [`Stream::unfold`] is the general one: it grows a stream from a seed,
//! one step per node, until the step function says to stop. The other
//! generators are unfolds with a particular step.

use std::iter::FromIterator;
use std::sync::Arc;

use super::node::Stream;

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Builds a stream from a seed and a step function.
    ///
    /// `step(state)` returns `None` to end the stream, or `Some((value,
    /// next_state))` to emit `value` and continue from `next_state`. The step
    /// runs on the seed now, to decide whether the stream is empty, and on
    /// each later state only when the tail holding it is forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::unfold(0, |state| if state > 2 { None } else { Some((state, state + 1)) });
    /// assert_eq!(stream.to_list(), vec![0, 1, 2]);
    ///
    /// let powers = Stream::unfold(1u64, |power| Some((power, power * 2)));
    /// assert_eq!(powers.take(5).to_list(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn unfold<S, F>(seed: S, step: F) -> Self
    where
        S: Clone + Send + Sync + 'static,
        F: Fn(S) -> Option<(T, S)> + Send + Sync + 'static,
    {
        Self::unfold_shared(seed, &Arc::new(step))
    }

    fn unfold_shared<S, F>(seed: S, step: &Arc<F>) -> Self
    where
        S: Clone + Send + Sync + 'static,
        F: Fn(S) -> Option<(T, S)> + Send + Sync + 'static,
    {
        match step(seed) {
            None => Self::empty(),
            Some((value, next)) => {
                let step = Arc::clone(step);
                Self::with_head(value, move || Self::unfold_shared(next.clone(), &step))
            }
        }
    }

    /// Builds a stream over the elements of a finite collection, in order.
    ///
    /// The elements are gathered once into shared storage; each node then
    /// peels off one element by index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::of_collection(vec!["a", "b", "c"]);
    /// assert_eq!(stream.to_list(), vec!["a", "b", "c"]);
    /// ```
    pub fn of_collection<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Arc<[T]> = values.into_iter().collect();
        Self::unfold((values, 0_usize), |(values, index)| {
            let value = values.get(index).cloned()?;
            Some((value, (values, index + 1)))
        })
    }

    /// An infinite stream repeating `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::constant(7).take(3).to_list(), vec![7, 7, 7]);
    /// ```
    pub fn constant(value: T) -> Self {
        Self::unfold(value, |value| Some((value.clone(), value)))
    }
}

impl Stream<i64> {
    /// Counts up from `start` by one.
    ///
    /// The stream ends after `i64::MAX` rather than wrapping around.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::from(5).take(3).to_list(), vec![5, 6, 7]);
    /// assert_eq!(Stream::from(i64::MAX).to_list(), vec![i64::MAX]);
    /// ```
    // A counting generator, not a conversion.
    #[allow(clippy::should_implement_trait)]
    pub fn from(start: i64) -> Self {
        Self::unfold(Some(start), |state: Option<i64>| {
            state.map(|value| (value, value.checked_add(1)))
        })
    }
}

impl<T: Clone + Send + Sync + 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of_collection(iter)
    }
}
