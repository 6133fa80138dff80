use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// An endless producer of clones of one item, created with [`repeat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Repeat<T>(T);

/// Returns a producer that yields clones of `item` until its consumer stops it.
///
/// ```
/// use lazyseq::prelude::*;
///
/// assert_eq!(repeat("la").take(3).collect_vec(), vec!["la", "la", "la"]);
/// ```
pub fn repeat<T: Clone>(item: T) -> Repeat<T> {
    Repeat(item)
}

impl<T: Clone> Producer for Repeat<T> {
    type Item = T;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        loop {
            f(self.0.clone())?;
        }
    }
}

impl<T: Clone> IntoCursor for Repeat<T> {
    type Cursor = RepeatCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        RepeatCursor(Some(self.0))
    }
}

impl<T> Wrapper<T> for Repeat<T> {
    fn into_inner(self) -> T {
        self.0
    }
}

/// The cursor of a [`Repeat`] producer.
#[derive(Debug, Clone)]
pub struct RepeatCursor<T>(Option<T>);

impl<T: Clone> Cursor for RepeatCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        self.0.clone()
    }

    fn release(&mut self) {
        self.0 = None;
    }
}

/// An endless producer of the results of a function, created with [`repeat_with`].
#[derive(Debug, Clone, Copy)]
pub struct RepeatWith<F>(F);

/// Returns a producer that calls `f` for every item, until its consumer stops it.
pub fn repeat_with<T, F>(f: F) -> RepeatWith<F>
where
    F: FnMut() -> T,
{
    RepeatWith(f)
}

impl<T, G> Producer for RepeatWith<G>
where
    G: FnMut() -> T,
{
    type Item = T;

    fn drive<F>(mut self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        loop {
            f((self.0)())?;
        }
    }
}

impl<T, G> IntoCursor for RepeatWith<G>
where
    G: FnMut() -> T,
{
    type Cursor = RepeatWithCursor<G>;

    fn into_cursor(self) -> Self::Cursor {
        RepeatWithCursor(Some(self.0))
    }
}

impl<F> Wrapper<F> for RepeatWith<F> {
    fn into_inner(self) -> F {
        self.0
    }
}

/// The cursor of a [`RepeatWith`] producer.
#[derive(Debug, Clone)]
pub struct RepeatWithCursor<F>(Option<F>);

impl<T, F> Cursor for RepeatWithCursor<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        self.0.as_mut().map(|f| f())
    }

    fn release(&mut self) {
        self.0 = None;
    }
}
