//! The stream type, its node representation and the non-forcing accessors.

use std::fmt;

use crate::control::Memo;

/// A non-empty position: a memoized head and a memoized rest-of-stream.
pub(super) struct Node<T> {
    pub(super) head: Memo<T>,
    pub(super) tail: Memo<Stream<T>>,
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            tail: self.tail.clone(),
        }
    }
}

/// A lazy, memoized, persistent sequence.
///
/// A `Stream` is either empty or a node holding two memoized computations:
/// one for the head element and one for the rest of the stream. Neither is
/// run until something asks for it, and each runs at most once; every later
/// access, through any clone, sees the cached result.
///
/// Streams are immutable. Every operation returns a new stream, sharing
/// already-built suffixes with the original where it can. Cloning is cheap
/// (two reference-count increments).
///
/// # Examples
///
/// ```rust
/// use lazy_stream::stream::Stream;
///
/// let numbers = Stream::from(1);
/// let evens = numbers.filter(|n| n % 2 == 0).map(|n| n * 10).take(3);
/// assert_eq!(evens.to_list(), vec![20, 40, 60]);
/// ```
pub struct Stream<T> {
    pub(super) node: Option<Node<T>>,
}

impl<T> Stream<T> {
    /// Returns the empty stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream: Stream<i32> = Stream::empty();
    /// assert!(stream.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { node: None }
    }

    /// Creates a node from a head computation and a tail computation.
    ///
    /// Neither function is called here. Each is wrapped in a [`Memo`], so
    /// it runs on first demand and never again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::cons(|| 1, || Stream::cons(|| 2, Stream::empty));
    /// assert_eq!(stream.to_list(), vec![1, 2]);
    /// ```
    pub fn cons<H, R>(head: H, tail: R) -> Self
    where
        H: Fn() -> T + Send + Sync + 'static,
        R: Fn() -> Self + Send + Sync + 'static,
    {
        Self::from_parts(Memo::new(head), Memo::new(tail))
    }

    /// Returns a stream with `value` in front of this one.
    ///
    /// The new head is already evaluated and the tail is this stream, shared
    /// rather than copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let tail = Stream::of_collection(vec![2, 3]);
    /// let stream = tail.prepend(1);
    /// assert_eq!(stream.to_list(), vec![1, 2, 3]);
    /// assert_eq!(tail.to_list(), vec![2, 3]);
    /// ```
    #[must_use]
    pub fn prepend(&self, value: T) -> Self {
        Self::from_parts(Memo::evaluated(value), Memo::evaluated(self.clone()))
    }

    /// A node whose head is already known and whose tail is deferred.
    pub(super) fn with_head<R>(value: T, tail: R) -> Self
    where
        R: Fn() -> Self + Send + Sync + 'static,
    {
        Self::from_parts(Memo::evaluated(value), Memo::new(tail))
    }

    pub(super) fn from_parts(head: Memo<T>, tail: Memo<Self>) -> Self {
        Self {
            node: Some(Node { head, tail }),
        }
    }

    /// Returns `true` if this is the empty stream. Forces nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the first element, forcing the head but never the tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::cons(|| 1, || panic!("tail is never forced"));
    /// assert_eq!(stream.head(), Some(&1));
    /// ```
    pub fn head(&self) -> Option<&T> {
        self.node.as_ref().map(|node| node.head.get())
    }

    /// Returns the rest of the stream, forcing the tail but not the head.
    ///
    /// The tail of the empty stream is empty.
    #[must_use]
    pub fn tail(&self) -> Self {
        self.node
            .as_ref()
            .map_or_else(Self::empty, |node| node.tail.get().clone())
    }

    /// Splits off the first element, forcing both the head and the tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_stream::stream::Stream;
    ///
    /// let stream = Stream::of_collection(vec!['a', 'b']);
    /// let (head, rest) = stream.uncons().unwrap();
    /// assert_eq!(*head, 'a');
    /// assert_eq!(rest.to_list(), vec!['b']);
    /// ```
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.node
            .as_ref()
            .map(|node| (node.head.get(), node.tail.get().clone()))
    }
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// Streams of shareable elements can be forced from any thread
static_assertions::assert_impl_all!(Stream<i32>: Send, Sync);
static_assertions::assert_impl_all!(Stream<String>: Send, Sync);
static_assertions::assert_not_impl_any!(Stream<std::rc::Rc<i32>>: Send, Sync);

// Dropping a long, fully forced stream would otherwise recurse once per
// node. Evaluated tails that nobody else holds are unlinked in a loop.
impl<T> Drop for Stream<T> {
    fn drop(&mut self) {
        let mut next = self
            .node
            .take()
            .and_then(|mut node| node.tail.take_if_unique());

        while let Some(mut stream) = next {
            next = stream
                .node
                .take()
                .and_then(|mut node| node.tail.take_if_unique());
        }
    }
}

/// Shows the already-evaluated prefix without forcing anything.
///
/// Unevaluated heads print as `<unevaluated>`; an unevaluated tail ends the
/// listing with `..`.
impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Stream")?;
        let mut entries = formatter.debug_list();
        let mut current = self.node.as_ref();

        while let Some(node) = current {
            match node.head.get_if_evaluated() {
                Some(value) => entries.entry(value),
                None => entries.entry(&format_args!("<unevaluated>")),
            };
            match node.tail.get_if_evaluated() {
                Some(tail) => current = tail.node.as_ref(),
                None => {
                    entries.entry(&format_args!(".."));
                    break;
                }
            }
        }

        entries.finish()
    }
}

/// Forces the whole stream and renders it as a list, e.g. `[1, 2, 3]`.
///
/// Only use this on finite streams.
impl<T: fmt::Display> fmt::Display for Stream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{element}")?;
        }
        formatter.write_str("]")
    }
}
