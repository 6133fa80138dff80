use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that limits the number of items emitted by the inner producer.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Take<P> {
    inner: P,
    limit: usize,
}

impl<P> Take<P> {
    /// Returns a producer that yields at most `limit` items of `inner`.
    ///
    /// The inner producer is stopped as soon as the `limit`-th item was handed out. With a `limit` of zero,
    /// it is never started at all.
    ///
    /// ```
    /// use lazyseq::prelude::*;
    /// use lazyseq::producer::Take;
    ///
    /// assert_eq!(Take::new(from_iter([0, 1, 2]), 2).collect_vec(), vec![0, 1]);
    /// assert_eq!(Take::new(from_iter([0, 1, 2]), 4).collect_vec(), vec![0, 1, 2]);
    /// ```
    pub fn new(inner: P, limit: usize) -> Self {
        Take { inner, limit }
    }
}

impl<P> AsRef<P> for Take<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Take<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Take<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Producer> Producer for Take<P> {
    type Item = P::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        if self.limit == 0 {
            return ControlFlow::Continue(());
        }

        let mut remaining = self.limit;
        let mut stopped = false;

        // Reaching the limit stops the inner producer, but is not a stop by our own consumer.
        let _ = self.inner.drive(|item| {
            remaining -= 1;
            if f(item).is_break() {
                stopped = true;
                ControlFlow::Break(())
            } else if remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        if stopped {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<P: IntoCursor> IntoCursor for Take<P> {
    type Cursor = TakeCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        TakeCursor {
            inner: self.inner.into_cursor(),
            remaining: self.limit,
        }
    }
}

/// The cursor of a [`Take`] adaptor.
#[derive(Clone, Debug)]
pub struct TakeCursor<C> {
    inner: C,
    remaining: usize,
}

impl<C: Cursor> Cursor for TakeCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.inner.advance() {
            Some(item) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.inner.release();
                }
                Some(item)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn release(&mut self) {
        self.remaining = 0;
        self.inner.release();
    }
}

impl<C> Wrapper<C> for TakeCursor<C> {
    fn into_inner(self) -> C {
        self.inner
    }
}
