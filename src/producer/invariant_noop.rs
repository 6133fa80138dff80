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
}

impl<F> Invariant<F> {
    /// Returns a continuation that behaves exactly like `inner`, except that - when running tests - it
    /// panics if it is called again after returning `Break`.
    pub fn new(inner: F) -> Self {
        Invariant { inner }
    }

    /// Passes `item` on to the wrapped continuation.
    #[inline]
    pub fn emit<T>(&mut self, item: T) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        (self.inner)(item)
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
