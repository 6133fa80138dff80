use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that discards the first `n` items of the inner producer.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Skip<P> {
    inner: P,
    n: usize,
}

impl<P> Skip<P> {
    /// Returns a producer that yields the items of `inner` except for the first `n` ones.
    ///
    /// If `inner` has at most `n` items, nothing is yielded. `n == 0` yields every item.
    pub fn new(inner: P, n: usize) -> Self {
        Skip { inner, n }
    }
}

impl<P> AsRef<P> for Skip<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Skip<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Skip<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Producer> Producer for Skip<P> {
    type Item = P::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut remaining = self.n;
        self.inner.drive(|item| {
            if remaining > 0 {
                remaining -= 1;
                ControlFlow::Continue(())
            } else {
                f(item)
            }
        })
    }
}

impl<P: IntoCursor> IntoCursor for Skip<P> {
    type Cursor = SkipCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        SkipCursor {
            inner: self.inner.into_cursor(),
            remaining: self.n,
        }
    }
}

/// The cursor of a [`Skip`] adaptor. Discards the skipped items on its first advance.
#[derive(Clone, Debug)]
pub struct SkipCursor<C> {
    inner: C,
    remaining: usize,
}

impl<C: Cursor> Cursor for SkipCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.inner.advance()?;
        }
        self.inner.advance()
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

impl<C> Wrapper<C> for SkipCursor<C> {
    fn into_inner(self) -> C {
        self.inner
    }
}
