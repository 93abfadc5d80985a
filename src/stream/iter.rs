//! Borrowing iteration over a stream.

use std::iter::FusedIterator;

use super::node::Stream;
use crate::control::Memo;

/// An iterator over references to the elements of a [`Stream`].
///
/// Created by [`Stream::iter`]. Each call to `next` forces one head. The
/// tail after an element is forced only by the following call, so an
/// adapter such as `take(n)` never evaluates past the `n`-th element. The
/// references point into the stream's memoized nodes, so everything
/// visited stays cached for as long as the stream is alive.
pub struct Iter<'a, T> {
    next: Position<'a, T>,
}

enum Position<'a, T> {
    Start(&'a Stream<T>),
    After(&'a Memo<Stream<T>>),
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let stream = match self.next {
            Position::Start(stream) => stream,
            Position::After(tail) => tail.get(),
        };
        self.next = Position::Start(stream);
        let node = stream.node.as_ref()?;
        self.next = Position::After(&node.tail);
        Some(node.head.get())
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Stream<T> {
    /// Returns an iterator over references to the elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::from(1).take(4);
    /// let total: i64 = stream.iter().sum();
    /// assert_eq!(total, 10);
    ///
    /// let first_big = Stream::from(1).iter().copied().find(|n| n * n > 50);
    /// assert_eq!(first_big, Some(8));
    /// ```
    pub const fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: Position::Start(self),
        }
    }
}

impl<'a, T> IntoIterator for &'a Stream<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    fn test_iter_empty() {
        let stream: Stream<i32> = Stream::empty();
        assert_eq!(stream.iter().next(), None);
    }

    #[rstest]
    fn test_iter_yields_in_order() {
        let stream = Stream::of_collection(vec![3, 1, 2]);
        assert_eq!(stream.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[rstest]
    fn test_iter_is_fused() {
        let stream = Stream::of_collection(vec![1]);
        let mut iter = stream.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    fn test_next_does_not_force_tail() {
        let stream = Stream::cons(|| 1, || panic!("tail forced before it was asked for"));
        assert_eq!(stream.iter().next(), Some(&1));
    }

    #[rstest]
    fn test_take_on_filtered_stream_stops_at_last_match() {
        let steps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&steps);
        let multiples = Stream::unfold(0u32, move |state| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some((state, state + 1))
        })
        .filter(|n| n % 10 == 0);

        let first_two: Vec<u32> = multiples.iter().take(2).copied().collect();

        assert_eq!(first_two, vec![0, 10]);
        assert_eq!(steps.load(Ordering::SeqCst), 11);
    }

    #[rstest]
    fn test_for_loop_over_reference() {
        let stream = Stream::from(10).take(3);
        let mut seen = Vec::new();
        for value in &stream {
            seen.push(*value);
        }
        assert_eq!(seen, vec![10, 11, 12]);
    }
}
