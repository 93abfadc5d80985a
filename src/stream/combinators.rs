//! Operations derived from the fold primitives.
//!
//! Stream-producing operations (`map`, `filter`, `take_while`, `append`,
//! `flat_map`) are right folds whose combiner stores the continuation in a
//! new node, so they stay lazy. Whole-stream reductions (`to_list`,
//! `exists`, `for_all`, `sum`, `reverse`) are left folds, so they run in
//! constant stack space and stop early where the answer is already known.
//! `take` and `peek` rebuild nodes directly so they can reuse or wrap the
//! upstream head without forcing it.

use std::ops::Add;
use std::sync::Arc;

use super::fold::Continuation;
use super::node::Stream;
use crate::control::{Memo, ShortCircuit};

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Forces every element, in order, into a `Vec`.
    ///
    /// Runs in constant stack space. Never returns on an infinite stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::constant('x').take(3).to_list(), vec!['x', 'x', 'x']);
    /// ```
    pub fn to_list(&self) -> Vec<T> {
        self.fold_left(Vec::new(), |head, mut list| {
            list.push(head);
            ShortCircuit::continue_with(list)
        })
    }

    /// Passes each element to `consumer`, head to tail, in a loop.
    ///
    /// The walk holds only the node it is visiting, so on a stream that
    /// nothing else retains, visited nodes are released as it goes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let mut seen = Vec::new();
    /// Stream::from(1).take(3).for_each(|n| seen.push(*n));
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    pub fn for_each<F>(&self, mut consumer: F)
    where
        F: FnMut(&T),
    {
        let mut current = self.clone();
        while let Some(node) = &current.node {
            consumer(node.head.get());
            let next = node.tail.get().clone();
            current = next;
        }
    }

    /// Returns a stream of at most the first `count` elements.
    ///
    /// The new nodes share the upstream head computations. Nothing past the
    /// `count`-th element is ever forced, not even the node that follows it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::from(5).take(5).to_list(), vec![5, 6, 7, 8, 9]);
    /// assert!(Stream::from(5).take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        match &self.node {
            Some(node) if count > 0 => {
                let tail = if count == 1 {
                    Memo::evaluated(Self::empty())
                } else {
                    let upstream = node.tail.clone();
                    Memo::new(move || upstream.get().take(count - 1))
                };
                Self::from_parts(node.head.clone(), tail)
            }
            _ => Self::empty(),
        }
    }

    /// Returns an equivalent stream that shows each element to `consumer`
    /// when that element is first demanded downstream.
    ///
    /// Elements that are never demanded are never shown.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let log = Arc::clone(&seen);
    /// let stream = Stream::from(1).peek(move |n| log.lock().unwrap().push(*n));
    ///
    /// assert!(seen.lock().unwrap().is_empty());
    /// assert_eq!(stream.take(2).to_list(), vec![1, 2]);
    /// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn peek<F>(&self, consumer: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.peek_shared(&Arc::new(consumer))
    }

    fn peek_shared<F>(&self, consumer: &Arc<F>) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let Some(node) = &self.node else {
            return Self::empty();
        };

        let upstream_head = node.head.clone();
        let observer = Arc::clone(consumer);
        let upstream_tail = node.tail.clone();
        let consumer = Arc::clone(consumer);

        Self::cons(
            move || {
                let value = upstream_head.get().clone();
                observer(&value);
                value
            },
            move || upstream_tail.get().peek_shared(&consumer),
        )
    }

    /// Returns the longest prefix whose elements all satisfy `predicate`.
    ///
    /// The predicate is applied to the first element now and to each later
    /// element when it is demanded. Nothing after the first failing element
    /// is forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let small = Stream::from(0).take_while(|n| *n < 4);
    /// assert_eq!(small.to_list(), vec![0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.fold_right_to_stream(move |head, rest| {
            if predicate(&head) {
                Self::with_head(head, rest)
            } else {
                Self::empty()
            }
        })
    }

    /// Applies `function` to each element, lazily.
    ///
    /// The function runs for an element only when that element of the new
    /// stream is demanded, and at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let squares = Stream::from(1).map(|n| n * n);
    /// assert_eq!(squares.take(4).to_list(), vec![1, 4, 9, 16]);
    /// ```
    pub fn map<U, F>(&self, function: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        self.fold_right_to_stream(move |head, rest| {
            let function = Arc::clone(&function);
            Stream::cons(move || function(head.clone()), rest)
        })
    }

    /// Keeps the elements that satisfy `predicate`.
    ///
    /// Finding the next match forces elements eagerly and recurses once per
    /// skipped element through [`fold_right`](Self::fold_right), so a long
    /// run of non-matching elements costs stack, and an infinite run never
    /// returns. Bound the source first when that can happen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let odd = Stream::from(0).filter(|n| n % 2 == 1);
    /// assert_eq!(odd.take(3).to_list(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.fold_right_to_stream(move |head, rest| {
            if predicate(&head) {
                Self::with_head(head, rest)
            } else {
                rest()
            }
        })
    }

    /// Yields every element of this stream, then every element of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let joined = Stream::of_collection(vec![1, 2]).append(&Stream::of_collection(vec![3, 4]));
    /// assert_eq!(joined.to_list(), vec![1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        let other = other.clone();
        self.fold_right(move || other.clone(), |head, rest| Self::with_head(head, rest))
    }

    fn append_deferred(&self, other: Continuation<Self>) -> Self {
        let other: Arc<dyn Fn() -> Self + Send + Sync> = Arc::from(other);
        self.fold_right(move || other(), |head, rest| Self::with_head(head, rest))
    }

    /// Maps each element to a stream and concatenates the results lazily.
    ///
    /// Like [`filter`](Self::filter), consecutive elements that map to empty
    /// streams are skipped eagerly, one stack frame each.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let doubled = Stream::of_collection(vec!["a", "b"])
    ///     .flat_map(|s| Stream::of_collection(vec![s, s]));
    /// assert_eq!(doubled.to_list(), vec!["a", "a", "b", "b"]);
    /// ```
    pub fn flat_map<U, F>(&self, function: F) -> Stream<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Stream<U> + Send + Sync + 'static,
    {
        self.fold_right_to_stream(move |head, rest| function(head).append_deferred(rest))
    }

    /// Returns `true` as soon as an element satisfies `predicate`.
    ///
    /// Runs in constant stack space and stops at the first match, so it
    /// terminates on an infinite stream that contains one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert!(Stream::from(0).exists(|n| *n == 5));
    /// assert!(!Stream::from(0).take(5).exists(|n| *n == 5));
    /// ```
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.fold_left(false, |head, _| ShortCircuit::from_flag(predicate(&head)))
    }

    /// Returns `false` as soon as an element fails `predicate`.
    ///
    /// Runs in constant stack space and stops at the first failure, so it
    /// terminates on an infinite stream that contains one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert!(!Stream::from(0).for_all(|n| *n < 10));
    /// assert!(Stream::from(0).take(10).for_all(|n| *n < 10));
    /// ```
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.fold_left(true, |head, _| {
            if predicate(&head) {
                ShortCircuit::continue_with(true)
            } else {
                ShortCircuit::stop_with(false)
            }
        })
    }

    /// Returns the elements in reverse order, forcing the whole stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let reversed = Stream::of_collection(vec![1, 2, 3]).reverse();
    /// assert_eq!(reversed.to_list(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.fold_left(Self::empty(), |head, reversed| {
            ShortCircuit::continue_with(reversed.prepend(head))
        })
    }
}

impl<T> Stream<T>
where
    T: Add<Output = T> + Default + Clone + Send + Sync + 'static,
{
    /// Adds up every element, starting from `T::default()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::constant(1).take(100_000).sum(), 100_000);
    /// assert_eq!(Stream::<i32>::empty().sum(), 0);
    /// ```
    pub fn sum(&self) -> T {
        self.fold_left(T::default(), |head, total| {
            ShortCircuit::continue_with(total + head)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn one_two_three() -> Stream<&'static str> {
        Stream::of_collection(vec!["One", "Two", "Three"])
    }

    fn counted(values: Vec<i32>, calls: &Arc<AtomicUsize>) -> Stream<i32> {
        let calls = Arc::clone(calls);
        Stream::of_collection(values).map(move |value| {
            calls.fetch_add(1, Ordering::SeqCst);
            value
        })
    }

    #[rstest]
    fn test_filter() {
        assert_eq!(one_two_three().filter(|value| *value == "Two").to_list(), vec!["Two"]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(2, vec!["One", "Two"])]
    #[case(3, vec!["One", "Two", "Three"])]
    #[case(10, vec!["One", "Two", "Three"])]
    fn test_take(#[case] count: usize, #[case] expected: Vec<&str>) {
        assert_eq!(one_two_three().take(count).to_list(), expected);
    }

    #[rstest]
    fn test_take_never_forces_past_count() {
        let stream = Stream::cons(|| 1, || panic!("forced past the taken prefix"));
        assert_eq!(stream.take(1).to_list(), vec![1]);
    }

    #[rstest]
    fn test_take_shares_head_computation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = counted(vec![1, 2], &calls);

        let _ = source.take(1).head();
        let _ = source.head();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_take_while() {
        assert_eq!(
            one_two_three().take_while(|value| *value != "Three").to_list(),
            vec!["One", "Two"]
        );
    }

    #[rstest]
    fn test_append() {
        assert_eq!(
            one_two_three().append(&one_two_three()).to_list(),
            vec!["One", "Two", "Three", "One", "Two", "Three"]
        );
    }

    #[rstest]
    fn test_append_to_empty() {
        let empty: Stream<&str> = Stream::empty();
        assert_eq!(empty.append(&one_two_three()).to_list(), vec!["One", "Two", "Three"]);
        assert_eq!(one_two_three().append(&empty).to_list(), vec!["One", "Two", "Three"]);
    }

    #[rstest]
    fn test_append_is_lazy_on_infinite_prefix() {
        let stream = Stream::from(0).append(&Stream::from(100));
        assert_eq!(stream.take(3).to_list(), vec![0, 1, 2]);
    }

    #[rstest]
    fn test_flat_map() {
        assert_eq!(
            one_two_three()
                .flat_map(|value| Stream::of_collection(vec![value, value]))
                .to_list(),
            vec!["One", "One", "Two", "Two", "Three", "Three"]
        );
    }

    #[rstest]
    fn test_flat_map_on_infinite_stream() {
        let pairs = Stream::from(1).flat_map(|n| Stream::of_collection(vec![n, -n]));
        assert_eq!(pairs.take(4).to_list(), vec![1, -1, 2, -2]);
    }

    #[rstest]
    fn test_flat_map_skips_empty_results() {
        let evens = Stream::from(0)
            .take(6)
            .flat_map(|n| if n % 2 == 0 { Stream::of_collection(vec![n]) } else { Stream::empty() });
        assert_eq!(evens.to_list(), vec![0, 2, 4]);
    }

    #[rstest]
    #[case("Two", true)]
    #[case("Zero", false)]
    fn test_exists(#[case] needle: &str, #[case] expected: bool) {
        assert_eq!(one_two_three().exists(|value| *value == needle), expected);
    }

    #[rstest]
    fn test_for_all() {
        assert!(!one_two_three().for_all(|value| *value == "Two"));
        assert!(one_two_three().for_all(|_| true));
        assert!(Stream::<i32>::empty().for_all(|_| false));
    }

    #[rstest]
    fn test_map_defers_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stream = counted(vec![1, 2, 3], &calls);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(stream.head(), Some(&1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_peek_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let stream = one_two_three().peek(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let _ = stream.head();
        let _ = stream.head();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(stream.to_list(), vec!["One", "Two", "Three"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn test_reverse() {
        assert_eq!(one_two_three().reverse().to_list(), vec!["Three", "Two", "One"]);
    }

    #[rstest]
    #[case(vec![], 0)]
    #[case(vec![1], 1)]
    #[case(vec![1, 1, 1, 1, 1], 5)]
    fn test_sum(#[case] values: Vec<i32>, #[case] expected: i32) {
        assert_eq!(Stream::of_collection(values).sum(), expected);
    }

    #[rstest]
    fn test_for_each_handles_long_streams() {
        let mut count = 0usize;
        Stream::constant(()).take(300_000).for_each(|_| count += 1);
        assert_eq!(count, 300_000);
    }
}
