use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

/// A continuation wrapper that panics when a producer keeps emitting items after its consumer asked it to
/// stop.
///
/// This wrapper only performs the check when testing code (more specifically, when `#[cfg(test)]`
/// applies). In production builds, the wrapper does nothing at all and compiles away without any
/// overhead.
///
/// Every place in this crate that hands a continuation to user-supplied push code wraps it in this type.
/// We recommend doing the same for custom producers.
///
/// #### Invariants
///
/// The wrapper enforces the following invariant:
///
/// - Must not call [`emit`](Invariant::emit) after it returned [`ControlFlow::Break`].
#[derive(Debug, Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct Invariant<F> {
    /// The continuation supplied by the consumer.
    inner: F,
    /// `true` once the consumer asked to stop.
    stopped: bool,
}

impl<F> Invariant<F> {
    /// Returns a continuation that behaves exactly like `inner`, except that - when running tests - it
    /// panics if it is called again after returning `Break`.
    pub fn new(inner: F) -> Self {
        Invariant {
            inner,
            stopped: false,
        }
    }

    /// Passes `item` on to the wrapped continuation.
    pub fn emit<T>(&mut self, item: T) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        if self.stopped {
            panic!("may not emit items after the consumer asked to stop");
        }

        let flow = (self.inner)(item);
        if flow.is_break() {
            self.stopped = true;
        }
        flow
    }
}

impl<F> AsRef<F> for Invariant<F> {
    fn as_ref(&self) -> &F {
        &self.inner
    }
}

impl<F> AsMut<F> for Invariant<F> {
    fn as_mut(&mut self) -> &mut F {
        &mut self.inner
    }
}

impl<F> Wrapper<F> for Invariant<F> {
    fn into_inner(self) -> F {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;

    #[test]
    fn passes_items_through() {
        let mut seen = Vec::new();
        let mut guard = Invariant::new(|item: u8| {
            seen.push(item);
            ControlFlow::Continue(())
        });

        assert_eq!(guard.emit(1), ControlFlow::Continue(()));
        assert_eq!(guard.emit(2), ControlFlow::Continue(()));
        drop(guard);

        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "may not emit items after the consumer asked to stop")]
    fn panics_on_emit_after_break() {
        let mut guard = Invariant::new(|_item: u8| ControlFlow::Break(()));

        let _ = guard.emit(1);
        let _ = guard.emit(2);
    }

    #[test]
    #[should_panic(expected = "may not emit items after the consumer asked to stop")]
    fn catches_push_closures_that_ignore_stop_requests() {
        let stubborn = from_fn(|emit| {
            for i in 0..3 {
                // Deliberately ignores the stop request.
                let _ = emit(i);
            }
            ControlFlow::Continue(())
        });

        let _ = stubborn.take(1).drive(|_| ControlFlow::Continue(()));
    }
}
