use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that suppresses every item equal to its immediate predecessor.
///
/// Only consecutive duplicates collapse: an item equal to some earlier, but not the directly preceding,
/// item is still yielded. The adaptor keeps a clone of the last yielded item to compare against.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Compact<P> {
    inner: P,
}

impl<P> Compact<P> {
    pub fn new(inner: P) -> Self {
        Compact { inner }
    }
}

impl<P> AsRef<P> for Compact<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Compact<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Compact<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> Producer for Compact<P>
where
    P: Producer,
    P::Item: PartialEq + Clone,
{
    type Item = P::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut prev: Option<P::Item> = None;
        self.inner.drive(|item| {
            if prev.as_ref() == Some(&item) {
                return ControlFlow::Continue(());
            }
            prev = Some(item.clone());
            f(item)
        })
    }
}

impl<P> IntoCursor for Compact<P>
where
    P: IntoCursor,
    P::Item: PartialEq + Clone,
{
    type Cursor = CompactCursor<P::Cursor, P::Item>;

    fn into_cursor(self) -> Self::Cursor {
        CompactCursor {
            inner: self.inner.into_cursor(),
            prev: None,
        }
    }
}

/// The cursor of a [`Compact`] adaptor.
#[derive(Clone, Debug)]
pub struct CompactCursor<C, T> {
    inner: C,
    prev: Option<T>,
}

impl<C, T> Cursor for CompactCursor<C, T>
where
    C: Cursor<Item = T>,
    T: PartialEq + Clone,
{
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        loop {
            let item = self.inner.advance()?;
            if self.prev.as_ref() != Some(&item) {
                self.prev = Some(item.clone());
                return Some(item);
            }
        }
    }

    fn release(&mut self) {
        self.inner.release();
        self.prev = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn collapses_consecutive_duplicates() {
        let items = [1, 1, 2, 2, 2, 3, 3, 4];
        assert_eq!(from_iter(items).compact().collect_vec(), vec![1, 2, 3, 4]);
        assert_eq!(
            from_iter(items).compact().into_cursor().iter().collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn keeps_non_adjacent_repeats() {
        assert_eq!(from_iter("aabaa".chars()).compact().collect_vec(), vec!['a', 'b', 'a']);
    }

    #[test]
    fn agrees_with_dedup() {
        let mut items = vec![3, 3, 0, 0, 1, 3, 3, 3, 2, 2, 0, 1, 1];
        let compacted = from_iter(items.clone()).compact().collect_vec();
        items.dedup();
        assert_eq!(compacted, items);
    }
}
