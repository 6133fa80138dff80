use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Produces the items of a std [`Iterator`], created with [`from_iter`].
#[derive(Debug, Clone)]
pub struct FromIter<I>(I);

/// Returns a producer over anything that implements [`IntoIterator`]: arrays, slices, vectors, maps,
/// ranges, or another iterator.
///
/// The iterator is only advanced while the producer is driven. Driving a clone of the producer
/// traverses the sequence again from the start, provided the iterator is `Clone`.
///
/// ```
/// use lazyseq::prelude::*;
///
/// assert_eq!(from_iter(&[1, 2, 3]).collect_vec(), vec![&1, &2, &3]);
/// assert_eq!(from_iter("abc".chars()).collect_vec(), vec!['a', 'b', 'c']);
/// ```
pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter(iter.into_iter())
}

impl<I: Iterator> Producer for FromIter<I> {
    type Item = I::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(I::Item) -> ControlFlow<()>,
    {
        for item in self.0 {
            f(item)?;
        }
        ControlFlow::Continue(())
    }
}

impl<I: Iterator> IntoCursor for FromIter<I> {
    type Cursor = IterCursor<I>;

    fn into_cursor(self) -> Self::Cursor {
        IterCursor(Some(self.0))
    }
}

impl<I> Wrapper<I> for FromIter<I> {
    fn into_inner(self) -> I {
        self.0
    }
}

/// A cursor over a std [`Iterator`]. The iterator is dropped on exhaustion or release.
#[derive(Debug, Clone)]
pub struct IterCursor<I>(Option<I>);

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn advance(&mut self) -> Option<I::Item> {
        let item = self.0.as_mut()?.next();
        if item.is_none() {
            self.0 = None;
        }
        item
    }

    fn release(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use crate::prelude::*;

    #[test]
    fn produces_collections_in_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);

        assert_eq!(from_iter(map).collect_vec(), vec![("a", 1), ("b", 2)]);
        assert_eq!(from_iter(Vec::<u8>::new()).collect_vec(), Vec::<u8>::new());
    }

    #[test]
    fn stops_pulling_when_the_consumer_stops() {
        let mut pulled = 0;
        let flow = from_iter((0..).inspect(|_| pulled += 1)).drive(|n| {
            if n == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(pulled, 4);
    }

    #[test]
    fn cursor_is_fused() {
        let mut calls = 0;
        let mut cursor = from_iter(core::iter::from_fn(|| {
            calls += 1;
            if calls == 1 {
                None
            } else {
                Some(calls)
            }
        }))
        .into_cursor();

        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        drop(cursor);
        assert_eq!(calls, 1);
    }
}
