use core::ops::ControlFlow;

use crate::cursor::{Cursor, CursorExt};
use crate::producer::{IntoCursor, Producer};

/// Pairs up the items of two producers in lockstep, ending with the shorter one. Created with
/// [`ProducerExt::zip`](crate::ProducerExt::zip).
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Zip<A, B> {
    a: A,
    b: B,
}

impl<A, B> Zip<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Zip { a, b }
    }

    /// Consumes `self` and returns the two wrapped producers.
    pub fn into_inner(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: IntoCursor, B: IntoCursor> Producer for Zip<A, B> {
    type Item = (A::Item, B::Item);

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        self.into_cursor().drive_remaining(f)
    }
}

impl<A: IntoCursor, B: IntoCursor> IntoCursor for Zip<A, B> {
    type Cursor = ZipCursor<A::Cursor, B::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        ZipCursor {
            a: self.a.into_cursor(),
            b: self.b.into_cursor(),
            done: false,
        }
    }
}

/// The cursor of a [`Zip`].
///
/// Every step advances both sides exactly once, so at the final step the longer side has handed out one
/// item that ends up discarded. Both sides are released as soon as one of them is exhausted.
#[derive(Clone, Debug)]
pub struct ZipCursor<CA, CB> {
    a: CA,
    b: CB,
    done: bool,
}

impl<CA: Cursor, CB: Cursor> Cursor for ZipCursor<CA, CB> {
    type Item = (CA::Item, CB::Item);

    fn advance(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let a = self.a.advance();
        let b = self.b.advance();
        match (a, b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => {
                self.release();
                None
            }
        }
    }

    fn release(&mut self) {
        self.done = true;
        self.a.release();
        self.b.release();
    }
}

/// Pairs up the items of two producers in lockstep until both are exhausted, filling in
/// [`Default::default`] for the side that ended first. Created with
/// [`ProducerExt::zip_longest`](crate::ProducerExt::zip_longest).
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct ZipLongest<A, B> {
    a: A,
    b: B,
}

impl<A, B> ZipLongest<A, B> {
    pub fn new(a: A, b: B) -> Self {
        ZipLongest { a, b }
    }

    /// Consumes `self` and returns the two wrapped producers.
    pub fn into_inner(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A, B> Producer for ZipLongest<A, B>
where
    A: IntoCursor,
    B: IntoCursor,
    A::Item: Default,
    B::Item: Default,
{
    type Item = (A::Item, B::Item);

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        self.into_cursor().drive_remaining(f)
    }
}

impl<A, B> IntoCursor for ZipLongest<A, B>
where
    A: IntoCursor,
    B: IntoCursor,
    A::Item: Default,
    B::Item: Default,
{
    type Cursor = ZipLongestCursor<A::Cursor, B::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        ZipLongestCursor {
            a: Some(self.a.into_cursor()),
            b: Some(self.b.into_cursor()),
        }
    }
}

/// The cursor of a [`ZipLongest`]. A side is dropped the moment it reports exhaustion, and never
/// advanced again.
#[derive(Clone, Debug)]
pub struct ZipLongestCursor<CA, CB> {
    a: Option<CA>,
    b: Option<CB>,
}

fn advance_side<C: Cursor>(side: &mut Option<C>) -> Option<C::Item> {
    let item = side.as_mut()?.advance();
    if item.is_none() {
        *side = None;
    }
    item
}

fn release_side<C: Cursor>(side: &mut Option<C>) {
    if let Some(mut cursor) = side.take() {
        cursor.release();
    }
}

impl<CA, CB> Cursor for ZipLongestCursor<CA, CB>
where
    CA: Cursor,
    CB: Cursor,
    CA::Item: Default,
    CB::Item: Default,
{
    type Item = (CA::Item, CB::Item);

    fn advance(&mut self) -> Option<Self::Item> {
        match (advance_side(&mut self.a), advance_side(&mut self.b)) {
            (None, None) => None,
            (a, b) => Some((a.unwrap_or_default(), b.unwrap_or_default())),
        }
    }

    fn release(&mut self) {
        release_side(&mut self.a);
        release_side(&mut self.b);
    }
}
