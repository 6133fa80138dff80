use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Endlessly repeats the items of a collection, created with [`cycle`].
#[derive(Debug, Clone)]
pub struct Cycle<I>(I);

/// Returns a producer that yields the items of `items` in order, starting over from the first item after
/// the last one, until its consumer stops it.
///
/// An empty collection yields nothing.
///
/// ```
/// use lazyseq::prelude::*;
///
/// assert_eq!(cycle([1, 2, 3]).take(7).collect_vec(), vec![1, 2, 3, 1, 2, 3, 1]);
/// assert!(cycle(Vec::<u8>::new()).collect_vec().is_empty());
/// ```
pub fn cycle<I>(items: I) -> Cycle<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Clone,
{
    Cycle(items.into_iter())
}

impl<I: Iterator + Clone> Producer for Cycle<I> {
    type Item = I::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(I::Item) -> ControlFlow<()>,
    {
        loop {
            let mut lap = self.0.clone().peekable();
            if lap.peek().is_none() {
                return ControlFlow::Continue(());
            }

            for item in lap {
                f(item)?;
            }
        }
    }
}

impl<I: Iterator + Clone> IntoCursor for Cycle<I> {
    type Cursor = CycleCursor<I>;

    fn into_cursor(self) -> Self::Cursor {
        CycleCursor {
            lap: self.0.clone(),
            items: Some(self.0),
        }
    }
}

impl<I> Wrapper<I> for Cycle<I> {
    fn into_inner(self) -> I {
        self.0
    }
}

/// The cursor of a [`Cycle`] producer.
#[derive(Debug, Clone)]
pub struct CycleCursor<I> {
    /// `None` once released, or once the collection turned out to be empty.
    items: Option<I>,
    lap: I,
}

impl<I: Iterator + Clone> Cursor for CycleCursor<I> {
    type Item = I::Item;

    fn advance(&mut self) -> Option<I::Item> {
        let items = self.items.as_ref()?;

        if let Some(item) = self.lap.next() {
            return Some(item);
        }

        self.lap = items.clone();
        let item = self.lap.next();
        if item.is_none() {
            self.items = None;
        }
        item
    }

    fn release(&mut self) {
        self.items = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_over() {
        let mut cursor = cycle(['a', 'b']).into_cursor();
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), Some('a'));
        cursor.release();
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn empty_collection_ends_immediately() {
        let mut cursor = cycle(&[] as &[u8]).into_cursor();
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);

        assert_eq!(cycle(&[] as &[u8]).drive(|_| ControlFlow::Continue(())), ControlFlow::Continue(()));
    }
}
