use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Produces items by repeatedly calling a function until it returns `None`, created with [`from_next`].
#[derive(Debug, Clone)]
pub struct FromNext<F>(F);

/// Returns a producer that calls `next` for every item, ending at the first `None`.
///
/// `next` is never called again after it returned `None`.
///
/// ```
/// use lazyseq::prelude::*;
///
/// let mut countdown = 3;
/// let launch = from_next(move || {
///     countdown -= 1;
///     (countdown > 0).then_some(countdown)
/// });
/// assert_eq!(launch.collect_vec(), vec![2, 1]);
/// ```
pub fn from_next<T, F>(next: F) -> FromNext<F>
where
    F: FnMut() -> Option<T>,
{
    FromNext(next)
}

impl<T, G> Producer for FromNext<G>
where
    G: FnMut() -> Option<T>,
{
    type Item = T;

    fn drive<F>(mut self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        while let Some(item) = (self.0)() {
            f(item)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T, G> IntoCursor for FromNext<G>
where
    G: FnMut() -> Option<T>,
{
    type Cursor = FromNextCursor<G>;

    fn into_cursor(self) -> Self::Cursor {
        FromNextCursor(Some(self.0))
    }
}

impl<F> Wrapper<F> for FromNext<F> {
    fn into_inner(self) -> F {
        self.0
    }
}

/// The cursor of a [`FromNext`] producer.
#[derive(Debug, Clone)]
pub struct FromNextCursor<F>(Option<F>);

impl<T, F> Cursor for FromNextCursor<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        let item = (self.0.as_mut()?)();
        if item.is_none() {
            self.0 = None;
        }
        item
    }

    fn release(&mut self) {
        self.0 = None;
    }
}
