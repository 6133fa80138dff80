//! Grouping of adjacent items that share a key.
//!
//! A [`GroupBy`] pulls from a single cursor and hands out one [`Group`] per run of adjacent items with
//! equal keys. Each group is a producer (and cursor) that reads directly from the shared cursor, so no
//! group is ever buffered. The price is a strict discipline: a group must be consumed before the engine
//! moves on to the next one. Groups mutably borrow the engine, so the borrow checker enforces this.

use core::fmt;
use core::mem;
use core::ops::ControlFlow;

use crate::cursor::{Cursor, CursorExt};
use crate::producer::{IntoCursor, Producer};

/// Splits an item into the key that determines its group, and the value that the group yields.
pub trait Split<T> {
    type Key: PartialEq;
    type Value;

    fn split(&mut self, item: T) -> (Self::Key, Self::Value);
}

/// Keys each item by a function of the item, yielding the item itself. Used by
/// [`ProducerExt::group_by`](crate::ProducerExt::group_by).
#[derive(Copy, Clone, Debug)]
pub struct ByKeyFn<F>(pub F);

impl<T, K, F> Split<T> for ByKeyFn<F>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Key = K;
    type Value = T;

    fn split(&mut self, item: T) -> (K, T) {
        ((self.0)(&item), item)
    }
}

/// Treats items as `(key, value)` pairs. Used by
/// [`ProducerExt::group_by_key`](crate::ProducerExt::group_by_key).
#[derive(Copy, Clone, Debug, Default)]
pub struct ByPair;

impl<K: PartialEq, V> Split<(K, V)> for ByPair {
    type Key = K;
    type Value = V;

    fn split(&mut self, (key, value): (K, V)) -> (K, V) {
        (key, value)
    }
}

/// Keys each item by a clone of itself, so that groups are runs of equal items. Used by
/// [`ProducerExt::group`](crate::ProducerExt::group).
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl<T: Clone + PartialEq> Split<T> for Identity {
    type Key = T;
    type Value = T;

    fn split(&mut self, item: T) -> (T, T) {
        (item.clone(), item)
    }
}

enum State<K, V> {
    /// Nothing was pulled from the cursor yet.
    AwaitFirst,
    /// A group with this key has been handed out. `start` is its first value until that was yielded.
    InGroup { key: K, start: Option<V> },
    /// The last group ended at a value with a different key, which starts the next group.
    BetweenGroups { key: K, start: V },
    /// The cursor is exhausted or released.
    Drained,
}

impl<K, V> State<K, V> {
    fn name(&self) -> &'static str {
        match self {
            State::AwaitFirst => "AwaitFirst",
            State::InGroup { .. } => "InGroup",
            State::BetweenGroups { .. } => "BetweenGroups",
            State::Drained => "Drained",
        }
    }
}

/// Partitions the items of a cursor into runs of adjacent items with equal keys.
///
/// Created with [`ProducerExt::group_by`](crate::ProducerExt::group_by),
/// [`ProducerExt::group`](crate::ProducerExt::group) or
/// [`ProducerExt::group_by_key`](crate::ProducerExt::group_by_key). Nothing is pulled from the underlying
/// cursor until the first group is requested.
///
/// Grouping only considers adjacency: a key that shows up again after a different key starts a new
/// group.
///
/// Handing out a group requires `S::Key: Clone`. The caller gets the key, while the engine keeps its own
/// copy to compare the following items against until the group ends. The key is cloned once per group,
/// never per item.
///
/// ```
/// use core::ops::ControlFlow;
/// use lazyseq::prelude::*;
///
/// let mut runs = Vec::new();
/// let _ = from_iter([1, 1, 2, 1, 1, 1]).group().for_each_group(|n, group| {
///     runs.push((n, group.collect_vec().len()));
///     ControlFlow::Continue(())
/// });
/// assert_eq!(runs, vec![(1, 2), (2, 1), (1, 3)]);
/// ```
///
/// Groups must be consumed (or abandoned) before asking for the next one. An abandoned group is skipped,
/// so the engine still reaches the next key:
///
/// ```
/// use lazyseq::prelude::*;
///
/// let mut groups = from_iter(["apple", "avocado", "banana", "cherry"]).group_by(|s: &&str| s.len());
///
/// let (len, mut group) = groups.next_group().unwrap();
/// assert_eq!((len, group.advance()), (5, Some("apple")));
///
/// let (len, group) = groups.next_group().unwrap();
/// assert_eq!((len, group.collect_vec()), (7, vec!["avocado"]));
///
/// let (len, group) = groups.next_group().unwrap();
/// assert_eq!((len, group.collect_vec()), (6, vec!["banana", "cherry"]));
///
/// assert!(groups.next_group().is_none());
/// ```
pub struct GroupBy<C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    cursor: C,
    split: S,
    state: State<S::Key, S::Value>,
}

impl<C, S> GroupBy<C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    /// Groups the items of `cursor`, splitting each item into a key and a value with `split`.
    pub fn new(cursor: C, split: S) -> Self {
        GroupBy {
            cursor,
            split,
            state: State::AwaitFirst,
        }
    }

    /// Returns the key and the values of the next group, or `None` once the cursor is exhausted.
    ///
    /// If the previous group was not consumed to its end, its remaining values are skipped first. The
    /// returned key is a clone of the one the engine compares against while the group is open.
    pub fn next_group(&mut self) -> Option<(S::Key, Group<'_, C, S>)>
    where
        S::Key: Clone,
    {
        loop {
            match mem::replace(&mut self.state, State::Drained) {
                State::AwaitFirst => {
                    let Some(item) = self.cursor.advance() else {
                        self.cursor.release();
                        return None;
                    };

                    let (key, start) = self.split.split(item);
                    return Some(self.open(key, start));
                }
                State::InGroup { key, start: _ } => {
                    self.state = State::InGroup { key, start: None };

                    let mut skipped = 0usize;
                    while self.advance_in_group().is_some() {
                        skipped += 1;
                    }
                    tracing::trace!(skipped, "skipped the rest of an unfinished group");
                }
                State::BetweenGroups { key, start } => return Some(self.open(key, start)),
                State::Drained => return None,
            }
        }
    }

    /// Calls `f` with the key and the values of every group, in order, until `f` returns
    /// [`ControlFlow::Break`] or all groups were visited.
    ///
    /// Stopping early releases the underlying cursor. Returns `Break` if and only if `f` stopped.
    pub fn for_each_group<F>(mut self, mut f: F) -> ControlFlow<()>
    where
        S::Key: Clone,
        F: for<'g> FnMut(S::Key, Group<'g, C, S>) -> ControlFlow<()>,
    {
        while let Some((key, group)) = self.next_group() {
            if f(key, group).is_break() {
                self.release();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Stops grouping and releases the underlying cursor. Every later call to
    /// [`next_group`](Self::next_group) returns `None`.
    pub fn release(&mut self) {
        if !matches!(self.state, State::Drained) {
            tracing::trace!(state = self.state.name(), "group_by released");
        }
        self.state = State::Drained;
        self.cursor.release();
    }

    fn open(&mut self, key: S::Key, start: S::Value) -> (S::Key, Group<'_, C, S>)
    where
        S::Key: Clone,
    {
        self.state = State::InGroup {
            key: key.clone(),
            start: Some(start),
        };

        (
            key,
            Group {
                engine: self,
                done: false,
            },
        )
    }

    /// Yields the next value of the current group, or `None` once the group has ended.
    fn advance_in_group(&mut self) -> Option<S::Value> {
        let State::InGroup { key, start } = &mut self.state else {
            return None;
        };

        if let Some(value) = start.take() {
            return Some(value);
        }

        match self.cursor.advance() {
            None => {
                self.state = State::Drained;
                self.cursor.release();
                None
            }
            Some(item) => {
                let (next_key, value) = self.split.split(item);
                if next_key == *key {
                    Some(value)
                } else {
                    self.state = State::BetweenGroups {
                        key: next_key,
                        start: value,
                    };
                    None
                }
            }
        }
    }
}

impl<C, S> fmt::Debug for GroupBy<C, S>
where
    C: Cursor + fmt::Debug,
    S: Split<C::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupBy")
            .field("cursor", &self.cursor)
            .field("state", &self.state.name())
            .finish_non_exhaustive()
    }
}

/// The values of one group of a [`GroupBy`].
///
/// A group is both a [`Cursor`] and a [`Producer`]. It reads from the cursor it shares with its engine, and
/// ends where the next group starts. Releasing or dropping a group before its end only abandons the
/// group; the engine skips the rest of it when asked for the next group.
pub struct Group<'g, C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    engine: &'g mut GroupBy<C, S>,
    done: bool,
}

impl<C, S> Cursor for Group<'_, C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    type Item = S::Value;

    fn advance(&mut self) -> Option<S::Value> {
        if self.done {
            return None;
        }

        let value = self.engine.advance_in_group();
        if value.is_none() {
            self.done = true;
        }
        value
    }

    fn release(&mut self) {
        self.done = true;
    }
}

impl<C, S> Producer for Group<'_, C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    type Item = S::Value;

    fn drive<F>(mut self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        self.drive_remaining(f)
    }
}

impl<'g, C, S> IntoCursor for Group<'g, C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    type Cursor = Self;

    fn into_cursor(self) -> Self {
        self
    }
}

impl<C, S> fmt::Debug for Group<'_, C, S>
where
    C: Cursor,
    S: Split<C::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group").field("done", &self.done).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    use crate::prelude::*;
    use crate::producer::TestProducer;

    fn first_letter(s: &&str) -> char {
        s.chars().next().unwrap_or_default()
    }

    fn collect_groups<C, S>(groups: GroupBy<C, S>) -> Vec<(S::Key, Vec<S::Value>)>
    where
        C: Cursor,
        S: Split<C::Item>,
        S::Key: Clone,
    {
        let mut out = Vec::new();
        let _ = groups.for_each_group(|key, group| {
            out.push((key, group.collect_vec()));
            ControlFlow::Continue(())
        });
        out
    }

    #[derive(Debug)]
    struct CountedKey<'c> {
        name: String,
        clones: &'c Cell<usize>,
    }

    impl Clone for CountedKey<'_> {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            CountedKey {
                name: self.name.clone(),
                clones: self.clones,
            }
        }
    }

    impl PartialEq for CountedKey<'_> {
        fn eq(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    #[test]
    fn owned_keys_are_cloned_once_per_group() {
        let clones = Cell::new(0);
        let pairs = ["x", "x", "x", "y", "y", "x"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let key = CountedKey {
                    name: name.to_string(),
                    clones: &clones,
                };
                (key, i)
            });

        let groups = collect_groups(from_iter(pairs).group_by_key());
        let summary: Vec<_> = groups.iter().map(|(k, v)| (k.name.as_str(), v.clone())).collect();
        assert_eq!(summary, vec![("x", vec![0, 1, 2]), ("y", vec![3, 4]), ("x", vec![5])]);
        assert_eq!(clones.get(), 3);
    }

    #[test]
    fn groups_by_string_keys() {
        let words = from_iter(["one", "two", "three", "four", "five"]);
        let by_parity = words.group_by(|s: &&str| {
            let parity = if s.len() % 2 == 0 { "even" } else { "odd" };
            parity.to_string()
        });
        assert_eq!(
            collect_groups(by_parity),
            vec![
                ("odd".to_string(), vec!["one", "two", "three"]),
                ("even".to_string(), vec!["four", "five"]),
            ]
        );
    }

    #[test]
    fn groups_adjacent_runs() {
        let fruit = from_iter(["apple", "apricot", "banana", "blueberry"]);
        assert_eq!(
            collect_groups(fruit.group_by(first_letter)),
            vec![('a', vec!["apple", "apricot"]), ('b', vec!["banana", "blueberry"])]
        );
    }

    #[test]
    fn grouping_is_adjacency_only() {
        let fruit = from_iter(["apple", "banana", "apricot"]);
        assert_eq!(
            collect_groups(fruit.group_by(first_letter)),
            vec![('a', vec!["apple"]), ('b', vec!["banana"]), ('a', vec!["apricot"])]
        );
    }

    #[test]
    fn single_run_is_one_group() {
        assert_eq!(collect_groups(from_iter([4, 4, 4]).group()), vec![(4, vec![4, 4, 4])]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let producer = TestProducer::<u8>::new(vec![]);
        let tally = producer.tally();

        assert!(collect_groups(producer.group()).is_empty());
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn group_by_key_uses_the_pairs() {
        let pairs = from_iter([("x", 1), ("x", 2), ("y", 3), ("x", 4)]);
        assert_eq!(
            collect_groups(pairs.group_by_key()),
            vec![("x", vec![1, 2]), ("y", vec![3]), ("x", vec![4])]
        );
    }

    #[test]
    fn unconsumed_groups_are_skipped() {
        let mut keys = Vec::new();
        let _ = from_iter([1, 1, 1, 2, 3, 3]).group().for_each_group(|key, _group| {
            keys.push(key);
            ControlFlow::Continue(())
        });
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn partially_consumed_groups_are_skipped() {
        let mut out = Vec::new();
        let _ = from_iter([1, 1, 1, 2, 2, 3]).group().for_each_group(|key, mut group| {
            out.push((key, group.advance()));
            ControlFlow::Continue(())
        });
        assert_eq!(out, vec![(1, Some(1)), (2, Some(2)), (3, Some(3))]);
    }

    #[test]
    fn stopping_after_the_second_group_releases_the_cursor() {
        let producer = TestProducer::new(vec!["a1", "a2", "b1", "b2", "c1", "c2", "c3", "d1"]);
        let tally = producer.tally();
        let key_calls = Cell::new(0);

        let mut seen = Vec::new();
        let flow = producer
            .group_by(|s: &&str| {
                key_calls.set(key_calls.get() + 1);
                s.as_bytes()[0]
            })
            .for_each_group(|key, group| {
                seen.push((key, group.collect_vec()));
                if seen.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, vec![(b'a', vec!["a1", "a2"]), (b'b', vec!["b1", "b2"])]);
        assert_eq!(tally.releases(), 1);
        // The lookahead read "c1" to end the second group, and nothing beyond.
        assert_eq!(tally.produced(), 5);
        assert_eq!(key_calls.get(), 5);
    }

    #[test]
    fn breaking_before_any_group_is_read_releases_the_cursor() {
        let producer = TestProducer::new(vec![1, 1, 2]);
        let tally = producer.tally();

        let flow = producer.group().for_each_group(|_, _| ControlFlow::Break(()));

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(tally.releases(), 1);
        assert_eq!(tally.produced(), 1);
    }

    #[test]
    fn dropping_the_engine_releases_the_cursor() {
        let producer = TestProducer::new(vec![1, 2, 3]);
        let tally = producer.tally();

        let mut groups = producer.group();
        let (key, _) = groups.next_group().unwrap();
        assert_eq!(key, 1);
        drop(groups);

        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn released_groups_end_but_the_engine_goes_on() {
        let mut groups = from_iter([1, 1, 1, 2]).group();

        let (_, mut group) = groups.next_group().unwrap();
        assert_eq!(group.advance(), Some(1));
        group.release();
        assert_eq!(group.advance(), None);

        let (key, group) = groups.next_group().unwrap();
        assert_eq!((key, group.collect_vec()), (2, vec![2]));
        assert!(groups.next_group().is_none());
    }

    #[test]
    fn release_ends_grouping() {
        let mut groups = from_iter([1, 2, 3]).group();
        assert!(groups.next_group().is_some());
        groups.release();
        assert!(groups.next_group().is_none());
    }

    #[test]
    fn groups_compose_with_combinators() {
        let mut sizes = Vec::new();
        let _ = from_iter("aaabccdddd".chars()).group().for_each_group(|c, group| {
            sizes.push((c, group.enumerate().keys().collect_vec().len()));
            ControlFlow::Continue(())
        });
        assert_eq!(sizes, vec![('a', 3), ('b', 1), ('c', 2), ('d', 4)]);
    }
}
