use core::array;
use core::ops::ControlFlow;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use either::Either::{self, Left, Right};

use crate::consumer;
use crate::producer::{
    ByKeyFn, ByPair, Chain, Compact, Enumerate, GroupBy, Identity, IntoCursor, Keys, Pairs,
    PairsPadded, Producer, Skip, Take, Then, Values, Zip, ZipLongest,
};

impl<P> ProducerExt for P where P: Producer {}

/// An extension trait for [`Producer`] that provides a variety of convenient combinator functions.
/// You never need to implement this trait yourself, it merely adds methods with default implementation to
/// existing producers.
///
/// None of the combinators does any work when called; they return producers that do their work when
/// driven.
pub trait ProducerExt: Producer {
    /// Drives the producer to exhaustion, calling `f` on every item.
    fn for_each<F>(self, mut f: F)
    where
        F: FnMut(Self::Item),
    {
        let _ = self.drive(|item| {
            f(item);
            ControlFlow::Continue(())
        });
    }

    /// Discards the first `n` items.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// assert_eq!(from_iter([1, 2, 3, 4]).skip(3).collect_vec(), vec![4]);
    /// assert_eq!(from_iter([1, 2, 3, 4]).skip(9).collect_vec(), Vec::<i32>::new());
    /// ```
    fn skip(self, n: usize) -> Skip<Self> {
        Skip::new(self, n)
    }

    /// Yields at most the first `n` items, then stops the producer.
    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    /// Yields consecutive, non-overlapping pairs of items, dropping a trailing unpaired item.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// assert_eq!(from_iter([1, 2, 3, 4, 5]).pairs().collect_vec(), vec![(1, 2), (3, 4)]);
    /// ```
    fn pairs(self) -> Pairs<Self> {
        Pairs::new(self)
    }

    /// Yields consecutive, non-overlapping pairs of items, pairing a trailing unpaired item with `pad`.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// assert_eq!(
    ///     from_iter([1, 2, 3, 4, 5]).pairs_padded(0).collect_vec(),
    ///     vec![(1, 2), (3, 4), (5, 0)],
    /// );
    /// ```
    fn pairs_padded(self, pad: Self::Item) -> PairsPadded<Self, Self::Item> {
        PairsPadded::new(self, pad)
    }

    /// Suppresses every item that is equal to its immediate predecessor.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// assert_eq!(from_iter([1, 1, 2, 2, 2, 3, 3, 4]).compact().collect_vec(), vec![1, 2, 3, 4]);
    /// ```
    fn compact(self) -> Compact<Self>
    where
        Self::Item: PartialEq + Clone,
    {
        Compact::new(self)
    }

    /// Pairs every item with its zero-based position.
    fn enumerate(self) -> Enumerate<Self> {
        Enumerate::new(self)
    }

    /// Calls `finalizer` once the traversal ends, whether by exhaustion, early stop or panic.
    fn then<G>(self, finalizer: G) -> Then<Self, G>
    where
        G: FnOnce(),
    {
        Then::new(self, finalizer)
    }

    /// Yields the items of `self`, followed by the items of `other`.
    ///
    /// To concatenate more than two producers of the same type, use the [`chain`](crate::producer::chain)
    /// function.
    fn chain<Q>(self, other: Q) -> Chain<array::IntoIter<Either<Self, Q>, 2>>
    where
        Q: Producer<Item = Self::Item>,
    {
        crate::producer::chain([Left(self), Right(other)])
    }

    /// Pairs up the items of `self` and `other` in lockstep, ending as soon as one of them is exhausted.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// let zipped = from_iter([1, 2, 3]).zip(from_iter(["a", "b", "c", "d"]));
    /// assert_eq!(zipped.collect_vec(), vec![(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    fn zip<Q>(self, other: Q) -> Zip<Self, Q>
    where
        Self: IntoCursor,
        Q: IntoCursor,
    {
        Zip::new(self, other)
    }

    /// Pairs up the items of `self` and `other` in lockstep until both are exhausted, substituting
    /// `Default::default()` for the items of the side that ended first.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// let zipped = from_iter([1, 2, 3]).zip_longest(from_iter(["a", "b", "c", "d"]));
    /// assert_eq!(zipped.collect_vec(), vec![(1, "a"), (2, "b"), (3, "c"), (0, "d")]);
    /// ```
    fn zip_longest<Q>(self, other: Q) -> ZipLongest<Self, Q>
    where
        Self: IntoCursor,
        Q: IntoCursor,
        Self::Item: Default,
        Q::Item: Default,
    {
        ZipLongest::new(self, other)
    }

    /// Yields the first component of every pair.
    fn keys<K, V>(self) -> Keys<Self>
    where
        Self: Producer<Item = (K, V)>,
    {
        Keys::new(self)
    }

    /// Yields the second component of every pair.
    fn values<K, V>(self) -> Values<Self>
    where
        Self: Producer<Item = (K, V)>,
    {
        Values::new(self)
    }

    /// Groups runs of adjacent items for which `key` returns equal keys. The key function is called
    /// exactly once per item that is pulled.
    ///
    /// Visiting the groups needs `K: Clone`, since [`GroupBy`] keeps a copy of the current key to compare
    /// against. Expensive keys are cloned once per group.
    fn group_by<K, F>(self, key: F) -> GroupBy<Self::Cursor, ByKeyFn<F>>
    where
        Self: IntoCursor,
        F: FnMut(&Self::Item) -> K,
        K: PartialEq,
    {
        GroupBy::new(self.into_cursor(), ByKeyFn(key))
    }

    /// Groups runs of adjacent equal items. Each group is keyed by (a clone of) its first item.
    fn group(self) -> GroupBy<Self::Cursor, Identity>
    where
        Self: IntoCursor,
        Self::Item: Clone + PartialEq,
    {
        GroupBy::new(self.into_cursor(), Identity)
    }

    /// Groups runs of adjacent `(key, value)` pairs with equal keys, yielding the values.
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use lazyseq::prelude::*;
    ///
    /// let mut totals = Vec::new();
    /// let _ = from_iter([("a", 1), ("a", 2), ("b", 5)]).group_by_key().for_each_group(|key, group| {
    ///     let mut sum = 0;
    ///     group.for_each(|n| sum += n);
    ///     totals.push((key, sum));
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(totals, vec![("a", 3), ("b", 5)]);
    /// ```
    fn group_by_key<K, V>(self) -> GroupBy<Self::Cursor, ByPair>
    where
        Self: IntoCursor<Item = (K, V)>,
        K: PartialEq,
    {
        GroupBy::new(self.into_cursor(), ByPair)
    }

    /// Drives the producer to exhaustion, adding every item to `dst`.
    fn collect_into<E>(self, dst: &mut E)
    where
        E: Extend<Self::Item>,
    {
        consumer::collect_into(self, dst)
    }

    /// Drives the producer to exhaustion, collecting its items into a vector.
    #[cfg(feature = "alloc")]
    fn collect_vec(self) -> Vec<Self::Item> {
        consumer::collect_vec(self)
    }

    /// Drives the producer to exhaustion, discarding its items.
    fn drain(self) {
        consumer::drain(self)
    }
}
