use core::fmt;
use core::marker::PhantomData;
use core::ops::ControlFlow;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer of no items at all, created with [`empty`]. It is its own cursor.
pub struct Empty<T>(PhantomData<fn() -> T>);

/// Returns a producer that is exhausted immediately.
pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        empty()
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

impl<T> Producer for Empty<T> {
    type Item = T;

    fn drive<F>(self, _f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        ControlFlow::Continue(())
    }
}

impl<T> IntoCursor for Empty<T> {
    type Cursor = Self;

    fn into_cursor(self) -> Self {
        self
    }
}

impl<T> Cursor for Empty<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        None
    }

    fn release(&mut self) {}
}
