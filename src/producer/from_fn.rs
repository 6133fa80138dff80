use core::fmt;
use core::marker::PhantomData;
use core::ops::ControlFlow;

use crate::producer::{Invariant, Producer};

#[cfg(feature = "std")]
use crate::{cursor::ThreadCursor, producer::IntoCursor};

/// The continuation that a push closure passed to [`from_fn`] emits its items into.
///
/// Calling it returns [`ControlFlow::Break`] once the consumer wants no more items; the closure must then
/// return without emitting again. The `?` operator makes this convenient:
///
/// ```
/// use core::ops::ControlFlow;
/// use lazyseq::prelude::*;
///
/// let squares = from_fn(|emit| {
///     for i in 1.. {
///         emit(i * i)?;
///     }
///     ControlFlow::Continue(())
/// });
///
/// assert_eq!(squares.take(4).collect_vec(), vec![1, 4, 9, 16]);
/// ```
pub type Emit<'a, T> = dyn FnMut(T) -> ControlFlow<()> + 'a;

/// A [`Producer`] defined by a push closure, created with [`from_fn`].
pub struct FromFn<G, T> {
    generator: G,
    _item: PhantomData<fn() -> T>,
}

/// Creates a producer from a closure that pushes its items into an [`Emit`] continuation.
///
/// The closure only runs when the producer is driven. Clone the producer to traverse it more than once
/// (which requires the closure to be `Clone`).
///
/// With the `std` feature, the producer also implements [`IntoCursor`] when the closure and its items can
/// be sent to another thread. Its cursor is a [`ThreadCursor`], which runs the closure on a driver thread.
pub fn from_fn<T, G>(generator: G) -> FromFn<G, T>
where
    G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()>,
{
    FromFn {
        generator,
        _item: PhantomData,
    }
}

impl<G: Clone, T> Clone for FromFn<G, T> {
    fn clone(&self) -> Self {
        FromFn {
            generator: self.generator.clone(),
            _item: PhantomData,
        }
    }
}

impl<G, T> fmt::Debug for FromFn<G, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<G, T> Producer for FromFn<G, T>
where
    G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()>,
{
    type Item = T;

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        let mut guard = Invariant::new(f);
        let mut stopped = false;

        // Whatever the closure returns, only the consumer decides whether this was an early stop.
        let _ = (self.generator)(&mut |item| {
            let flow = guard.emit(item);
            if flow.is_break() {
                stopped = true;
            }
            flow
        });

        if stopped {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(feature = "std")]
impl<G, T> IntoCursor for FromFn<G, T>
where
    G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()> + Send + 'static,
    T: Send + 'static,
{
    type Cursor = ThreadCursor<G, T>;

    fn into_cursor(self) -> Self::Cursor {
        ThreadCursor::new(self.generator)
    }
}
