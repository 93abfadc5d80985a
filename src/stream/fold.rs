//! The two reduction primitives every other stream operation is built on.
//!
//! - [`Stream::fold_right`] hands the combining function the current head
//!   and a *continuation* for the rest. It is plain recursion, but the
//!   recursion only happens when the combining function calls the
//!   continuation, so a lazy combiner (one that stores the continuation in
//!   a new stream node) forces one element at a time.
//! - [`Stream::fold_left`] walks head to tail through a
//!   [`Trampoline`], so it runs in constant stack space on streams of any
//!   length, and stops as soon as the step returns a terminal
//!   [`ShortCircuit`].

use std::sync::Arc;

use super::node::Stream;
use crate::control::{ShortCircuit, Trampoline};

/// The deferred rest of a right fold.
///
/// Calling it folds the remainder of the stream. It may be called any
/// number of times, or stored and called later.
pub type Continuation<B> = Box<dyn Fn() -> B + Send + Sync>;

type SharedBase<B> = Arc<dyn Fn() -> B + Send + Sync>;
type SharedCombine<T, B> = Arc<dyn Fn(T, Continuation<B>) -> B + Send + Sync>;

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Folds the stream from the right.
    ///
    /// For the empty stream this is `base()`. For a node it is
    /// `combine(head, rest)` where `rest` is a [`Continuation`] that folds
    /// the tail. The head is forced now; the tail only when `rest` is
    /// called.
    ///
    /// # Stack usage
    ///
    /// Each call of `rest` made from inside `combine` adds a stack frame.
    /// A combiner that calls `rest` for every element (summing, say)
    /// recurses once per element and will overflow on long streams; use
    /// [`fold_left`](Self::fold_left) for those. A combiner that stores
    /// `rest` in a new node recurses only as deep as the caller later
    /// forces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::of_collection(vec![1, 2, 3]);
    /// let text = stream.fold_right(String::new, |head, rest| format!("({head} {})", rest()));
    /// assert_eq!(text, "(1 (2 (3 )))");
    /// ```
    pub fn fold_right<B, Base, Combine>(&self, base: Base, combine: Combine) -> B
    where
        B: 'static,
        Base: Fn() -> B + Send + Sync + 'static,
        Combine: Fn(T, Continuation<B>) -> B + Send + Sync + 'static,
    {
        let base: SharedBase<B> = Arc::new(base);
        let combine: SharedCombine<T, B> = Arc::new(combine);
        self.fold_right_shared(&base, &combine)
    }

    /// A right fold that always produces a stream, starting from the empty
    /// stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let copy = Stream::of_collection(vec![1, 2, 3])
    ///     .fold_right_to_stream(|head, rest| Stream::cons(move || head, rest));
    /// assert_eq!(copy.to_list(), vec![1, 2, 3]);
    /// ```
    pub fn fold_right_to_stream<U, Combine>(&self, combine: Combine) -> Stream<U>
    where
        U: 'static,
        Combine: Fn(T, Continuation<Stream<U>>) -> Stream<U> + Send + Sync + 'static,
    {
        self.fold_right(Stream::empty, combine)
    }

    fn fold_right_shared<B: 'static>(
        &self,
        base: &SharedBase<B>,
        combine: &SharedCombine<T, B>,
    ) -> B {
        match &self.node {
            None => base(),
            Some(node) => {
                let head = node.head.get().clone();
                let tail = node.tail.clone();
                let (base, next) = (Arc::clone(base), Arc::clone(combine));
                let rest: Continuation<B> =
                    Box::new(move || tail.get().fold_right_shared(&base, &next));
                combine(head, rest)
            }
        }
    }

    /// Folds the stream from the left in constant stack space.
    ///
    /// `step` receives each element and the running accumulator and returns
    /// a [`ShortCircuit`]. A non-terminal result becomes the next
    /// accumulator; a terminal one ends the fold with its value, leaving the
    /// rest of the stream unforced. On reaching the end of the stream the
    /// current accumulator is returned.
    ///
    /// The tail after an element is forced only when the step for that
    /// element did not stop the fold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::control::ShortCircuit;
    /// use lazy_stream::stream::Stream;
    ///
    /// // Sum until the running total passes 10, on an infinite stream
    /// let total = Stream::from(1).fold_left(0, |head, total| {
    ///     let total = total + head;
    ///     if total > 10 {
    ///         ShortCircuit::stop_with(total)
    ///     } else {
    ///         ShortCircuit::continue_with(total)
    ///     }
    /// });
    /// assert_eq!(total, 15);
    /// ```
    pub fn fold_left<A, Step>(&self, initial: A, step: Step) -> A
    where
        Step: FnMut(T, A) -> ShortCircuit<A>,
    {
        fold_left_from(self.clone(), initial, step).run()
    }
}

fn fold_left_from<'a, T, A, Step>(
    stream: Stream<T>,
    accumulator: A,
    mut step: Step,
) -> Trampoline<'a, A>
where
    T: Clone + Send + Sync + 'static,
    A: 'a,
    Step: FnMut(T, A) -> ShortCircuit<A> + 'a,
{
    let Some(node) = &stream.node else {
        return Trampoline::done(accumulator);
    };

    let result = step(node.head.get().clone(), accumulator);
    if result.is_terminal() {
        return Trampoline::done(result.into_value());
    }

    let tail = node.tail.clone();
    let accumulator = result.into_value();
    Trampoline::pending(move || fold_left_from(tail.get().clone(), accumulator, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn one_two_three() -> Stream<&'static str> {
        Stream::of_collection(vec!["One", "Two", "Three"])
    }

    #[rstest]
    fn test_fold_right_preserves_order() {
        let copy = one_two_three().fold_right_to_stream(|head, rest| Stream::with_head(head, rest));
        assert_eq!(copy.to_list(), vec!["One", "Two", "Three"]);
    }

    #[rstest]
    fn test_fold_right_on_empty_uses_base() {
        let stream: Stream<i32> = Stream::empty();
        assert_eq!(stream.fold_right(|| 7, |head, rest| head + rest()), 7);
    }

    #[rstest]
    fn test_fold_right_forces_only_what_combine_demands() {
        let forced = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&forced);
        let stream = Stream::unfold(0, move |state: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some((state, state + 1))
        });

        let first = stream.fold_right(|| 0, |head, _rest| head);

        assert_eq!(first, 0);
        assert_eq!(forced.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_fold_left_visits_head_to_tail() {
        let visited = one_two_three().fold_left(Vec::new(), |head, mut visited| {
            visited.push(head);
            ShortCircuit::continue_with(visited)
        });
        assert_eq!(visited, vec!["One", "Two", "Three"]);
    }

    #[rstest]
    fn test_fold_left_stops_on_terminal_result() {
        let mut steps = 0;
        let result = Stream::from(0).fold_left(0, |head, _| {
            steps += 1;
            if head == 3 {
                ShortCircuit::stop_with(head * 100)
            } else {
                ShortCircuit::continue_with(head)
            }
        });

        assert_eq!(result, 300);
        assert_eq!(steps, 4);
    }

    #[rstest]
    fn test_fold_left_does_not_force_tail_after_terminal_step() {
        let stream = Stream::cons(|| 1, || panic!("tail forced after terminal step"));
        assert_eq!(stream.fold_left(0, |head, _| ShortCircuit::stop_with(head)), 1);
    }

    #[rstest]
    fn test_fold_left_is_stack_safe() {
        let count = Stream::constant(1u8)
            .take(200_000)
            .fold_left(0usize, |_, count| ShortCircuit::continue_with(count + 1));
        assert_eq!(count, 200_000);
    }
}
