use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that pairs every item with its zero-based position. The position wraps around to zero
/// after `usize::MAX`.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Enumerate<P> {
    inner: P,
}

impl<P> Enumerate<P> {
    pub fn new(inner: P) -> Self {
        Enumerate { inner }
    }
}

impl<P> AsRef<P> for Enumerate<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Enumerate<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Enumerate<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Producer> Producer for Enumerate<P> {
    type Item = (usize, P::Item);

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut position = 0usize;
        self.inner.drive(|item| {
            let current = position;
            position = position.wrapping_add(1);
            f((current, item))
        })
    }
}

impl<P: IntoCursor> IntoCursor for Enumerate<P> {
    type Cursor = EnumerateCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        EnumerateCursor {
            inner: self.inner.into_cursor(),
            position: 0,
        }
    }
}

/// The cursor of an [`Enumerate`] adaptor.
#[derive(Clone, Debug)]
pub struct EnumerateCursor<C> {
    inner: C,
    position: usize,
}

impl<C: Cursor> Cursor for EnumerateCursor<C> {
    type Item = (usize, C::Item);

    fn advance(&mut self) -> Option<Self::Item> {
        let item = self.inner.advance()?;
        let current = self.position;
        self.position = self.position.wrapping_add(1);
        Some((current, item))
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
