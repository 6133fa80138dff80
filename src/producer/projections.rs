use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Projects a producer of pairs onto the first components of its pairs.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Keys<P>(P);

impl<P> Keys<P> {
    pub fn new(inner: P) -> Self {
        Keys(inner)
    }
}

impl<P> Wrapper<P> for Keys<P> {
    fn into_inner(self) -> P {
        self.0
    }
}

impl<P, K, V> Producer for Keys<P>
where
    P: Producer<Item = (K, V)>,
{
    type Item = K;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(K) -> ControlFlow<()>,
    {
        self.0.drive(|(k, _)| f(k))
    }
}

impl<P, K, V> IntoCursor for Keys<P>
where
    P: IntoCursor<Item = (K, V)>,
{
    type Cursor = KeysCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        KeysCursor(self.0.into_cursor())
    }
}

/// The cursor of a [`Keys`] adaptor.
#[derive(Clone, Debug)]
pub struct KeysCursor<C>(C);

impl<C, K, V> Cursor for KeysCursor<C>
where
    C: Cursor<Item = (K, V)>,
{
    type Item = K;

    fn advance(&mut self) -> Option<K> {
        self.0.advance().map(|(k, _)| k)
    }

    fn release(&mut self) {
        self.0.release();
    }
}

/// Projects a producer of pairs onto the second components of its pairs.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Values<P>(P);

impl<P> Values<P> {
    pub fn new(inner: P) -> Self {
        Values(inner)
    }
}

impl<P> Wrapper<P> for Values<P> {
    fn into_inner(self) -> P {
        self.0
    }
}

impl<P, K, V> Producer for Values<P>
where
    P: Producer<Item = (K, V)>,
{
    type Item = V;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(V) -> ControlFlow<()>,
    {
        self.0.drive(|(_, v)| f(v))
    }
}

impl<P, K, V> IntoCursor for Values<P>
where
    P: IntoCursor<Item = (K, V)>,
{
    type Cursor = ValuesCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        ValuesCursor(self.0.into_cursor())
    }
}

/// The cursor of a [`Values`] adaptor.
#[derive(Clone, Debug)]
pub struct ValuesCursor<C>(C);

impl<C, K, V> Cursor for ValuesCursor<C>
where
    C: Cursor<Item = (K, V)>,
{
    type Item = V;

    fn advance(&mut self) -> Option<V> {
        self.0.advance().map(|(_, v)| v)
    }

    fn release(&mut self) {
        self.0.release();
    }
}
