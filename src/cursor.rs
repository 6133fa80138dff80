//! Demand-driven consumption of producers.
//!
//! A [`Cursor`] owns a suspended traversal of a producer. Each call to [`advance`](Cursor::advance)
//! resumes the traversal just long enough to obtain the next item; [`release`](Cursor::release) abandons
//! it for good. This is what lets two or more operators interleave their consumption of one logical
//! stream: [`zip`](crate::ProducerExt::zip) alternates between two cursors, and
//! [`GroupBy`](crate::producer::GroupBy) shares one cursor between the outer sequence of groups and the
//! group that is currently being read.
//!
//! Cursors obtained from producers in this crate are fused: once `advance` has returned `None`, it keeps
//! returning `None` without touching the producer again. They also release their producer when dropped,
//! so abandoning a cursor on an early return or while unwinding a panic never leaks the producer.

use core::iter::FusedIterator;
use core::ops::ControlFlow;

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use wrapper::Wrapper;

use crate::producer::{IntoCursor, Producer};

#[cfg(feature = "std")]
mod thread;
#[cfg(feature = "std")]
pub use thread::ThreadCursor;

/// A suspended traversal of a sequence, resumed one item at a time.
///
/// `advance` and `release` take `&mut self`, so a cursor has exactly one logical consumer at any time.
///
/// #### Invariants
///
/// - After `advance` returned `None`, every further call returns `None` and does not resume the producer.
/// - After `release`, every call to `advance` returns `None` immediately.
/// - `release` is idempotent, and may be called after exhaustion.
pub trait Cursor {
    /// The type of the items of the sequence.
    type Item;

    /// Resumes the traversal and returns the next item, or `None` once the sequence is exhausted.
    fn advance(&mut self) -> Option<Self::Item>;

    /// Abandons the traversal, letting the underlying producer release its resources.
    fn release(&mut self);
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        (**self).advance()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

#[cfg(feature = "alloc")]
impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        (**self).advance()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

impl<C> CursorExt for C where C: Cursor {}

/// An extension trait for [`Cursor`] that provides conversions into other ways of consuming a sequence.
/// You never need to implement this trait yourself.
pub trait CursorExt: Cursor {
    /// Drives the remainder of the sequence into `f`, then releases the cursor.
    ///
    /// Returns `Break` if `f` stopped the traversal, `Continue` if the cursor was exhausted. Either way
    /// the cursor has been released when this returns.
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use lazyseq::prelude::*;
    ///
    /// let mut cursor = from_iter([1, 2, 3, 4]).into_cursor();
    /// assert_eq!(cursor.advance(), Some(1));
    ///
    /// let mut rest = Vec::new();
    /// cursor.drive_remaining(|n| {
    ///     rest.push(n);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(rest, vec![2, 3, 4]);
    /// assert_eq!(cursor.advance(), None);
    /// ```
    fn drive_remaining<F>(&mut self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        while let Some(item) = self.advance() {
            if f(item).is_break() {
                self.release();
                return ControlFlow::Break(());
            }
        }

        self.release();
        ControlFlow::Continue(())
    }

    /// Turns the cursor into a std [`Iterator`]. Dropping the iterator releases the cursor.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    ///
    /// let evens: Vec<u32> = range(0, 10, 2).into_cursor().iter().collect();
    /// assert_eq!(evens, vec![0, 2, 4, 6, 8]);
    /// ```
    fn iter(self) -> Iter<Self>
    where
        Self: Sized,
    {
        Iter(self)
    }

    /// Turns the cursor back into a [`Producer`], which drives whatever items remain.
    fn into_producer(self) -> Pulled<Self>
    where
        Self: Sized,
    {
        Pulled(self)
    }
}

/// A std [`Iterator`] over the items of a [`Cursor`], created with [`CursorExt::iter`].
#[derive(Debug, Clone)]
pub struct Iter<C>(C);

impl<C: Cursor> Iterator for Iter<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.advance()
    }
}

impl<C: Cursor> FusedIterator for Iter<C> {}

impl<C> Wrapper<C> for Iter<C> {
    fn into_inner(self) -> C {
        self.0
    }
}

/// A [`Producer`] that drives the remaining items of a [`Cursor`], created with
/// [`CursorExt::into_producer`].
#[derive(Debug, Clone)]
pub struct Pulled<C>(C);

impl<C: Cursor> Producer for Pulled<C> {
    type Item = C::Item;

    fn drive<F>(mut self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        self.0.drive_remaining(f)
    }
}

impl<C: Cursor> IntoCursor for Pulled<C> {
    type Cursor = C;

    fn into_cursor(self) -> Self::Cursor {
        self.0
    }
}

impl<C> Wrapper<C> for Pulled<C> {
    fn into_inner(self) -> C {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;
    use crate::producer::TestProducer;

    #[test]
    fn advance_after_exhaustion_does_not_resume() {
        let producer = TestProducer::new(vec![1, 2]);
        let tally = producer.tally();
        let mut cursor = producer.into_cursor();

        assert_eq!(cursor.advance(), Some(1));
        assert_eq!(cursor.advance(), Some(2));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);

        assert_eq!(tally.produced(), 2);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let producer = TestProducer::new(vec![1, 2, 3]);
        let tally = producer.tally();
        let mut cursor = producer.into_cursor();

        assert_eq!(cursor.advance(), Some(1));
        cursor.release();
        cursor.release();
        assert_eq!(cursor.advance(), None);
        cursor.release();

        assert_eq!(tally.produced(), 1);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn release_after_exhaustion_is_a_no_op() {
        let producer = TestProducer::new(vec![7]);
        let tally = producer.tally();
        let mut cursor = producer.into_cursor();

        assert_eq!(cursor.advance(), Some(7));
        assert_eq!(cursor.advance(), None);
        cursor.release();

        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn dropping_a_cursor_releases_it() {
        let producer = TestProducer::new(vec![1, 2, 3]);
        let tally = producer.tally();
        let mut cursor = producer.into_cursor();

        assert_eq!(cursor.advance(), Some(1));
        drop(cursor);

        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn drive_remaining_releases_on_stop() {
        let producer = TestProducer::new(vec![1, 2, 3, 4]);
        let tally = producer.tally();
        let mut cursor = producer.into_cursor();

        let flow = cursor.drive_remaining(|n| {
            if n == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(tally.produced(), 2);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn pulled_producer_drives_the_rest() {
        let mut cursor = from_iter(1..=5).into_cursor();
        assert_eq!(cursor.advance(), Some(1));

        assert_eq!(cursor.into_producer().skip(1).collect_vec(), vec![3, 4, 5]);
    }
}
