use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that calls a finalizer exactly once when a traversal of the inner producer ends.
///
/// The finalizer runs when the inner producer is exhausted (immediately, if it is empty), when the consumer
/// stops early, and when a panic unwinds through the traversal. For a cursor, the finalizer runs on
/// exhaustion, or when a cursor that was advanced at least once is released or dropped; a cursor that is
/// discarded without ever being advanced never started a traversal and does not run it.
///
/// ```
/// use core::cell::Cell;
/// use lazyseq::prelude::*;
///
/// let done = Cell::new(false);
/// let firsts = from_iter(1..).then(|| done.set(true)).take(2).collect_vec();
///
/// assert_eq!(firsts, vec![1, 2]);
/// assert!(done.get());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Then<P, G> {
    inner: P,
    finalizer: G,
}

impl<P, G> Then<P, G> {
    pub fn new(inner: P, finalizer: G) -> Self {
        Then { inner, finalizer }
    }

    /// Consumes `self` and returns the wrapped producer, discarding the finalizer without running it.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P, G> AsRef<P> for Then<P, G> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P, G> AsMut<P> for Then<P, G> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

/// Runs the wrapped finalizer when dropped.
struct Finally<G: FnOnce()>(Option<G>);

impl<G: FnOnce()> Drop for Finally<G> {
    fn drop(&mut self) {
        if let Some(finalizer) = self.0.take() {
            finalizer();
        }
    }
}

impl<P, G> Producer for Then<P, G>
where
    P: Producer,
    G: FnOnce(),
{
    type Item = P::Item;

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let _finally = Finally(Some(self.finalizer));
        self.inner.drive(f)
    }
}

impl<P, G> IntoCursor for Then<P, G>
where
    P: IntoCursor,
    G: FnOnce(),
{
    type Cursor = ThenCursor<P::Cursor, G>;

    fn into_cursor(self) -> Self::Cursor {
        ThenCursor {
            inner: self.inner.into_cursor(),
            finalizer: Some(self.finalizer),
            started: false,
        }
    }
}

/// The cursor of a [`Then`] adaptor.
#[derive(Debug)]
pub struct ThenCursor<C, G: FnOnce()> {
    inner: C,
    /// `None` once the finalizer ran, or was discarded by an unstarted release.
    finalizer: Option<G>,
    started: bool,
}

impl<C, G: FnOnce()> ThenCursor<C, G> {
    fn finish(&mut self) {
        if let Some(finalizer) = self.finalizer.take() {
            if self.started {
                finalizer();
            }
        }
    }
}

impl<C, G> Cursor for ThenCursor<C, G>
where
    C: Cursor,
    G: FnOnce(),
{
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        if self.finalizer.is_none() {
            return None;
        }

        self.started = true;
        let item = self.inner.advance();
        if item.is_none() {
            self.finish();
        }
        item
    }

    fn release(&mut self) {
        self.inner.release();
        self.finish();
    }
}

impl<C, G: FnOnce()> Drop for ThenCursor<C, G> {
    fn drop(&mut self) {
        // The inner cursor releases itself when dropped right after this.
        self.finish();
    }
}
