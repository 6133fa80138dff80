use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Yields all items of a sequence of producers, one producer after the other, created with [`chain`] or
/// [`ProducerExt::chain`](crate::ProducerExt::chain).
#[derive(Debug, Clone)]
pub struct Chain<I>(I);

/// Returns a producer of the items of every producer in `producers`, in order.
///
/// Each producer is driven to exhaustion before the next one starts, and is never driven again. If the
/// consumer stops, the remaining producers are never started. An empty list of producers yields nothing.
///
/// ```
/// use lazyseq::prelude::*;
///
/// let parts = vec![from_iter(vec![1, 2]), from_iter(vec![]), from_iter(vec![3])];
/// assert_eq!(chain(parts).collect_vec(), vec![1, 2, 3]);
/// ```
pub fn chain<I>(producers: I) -> Chain<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Producer,
{
    Chain(producers.into_iter())
}

impl<I> Producer for Chain<I>
where
    I: Iterator,
    I::Item: Producer,
{
    type Item = <I::Item as Producer>::Item;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        for producer in self.0 {
            producer.drive(&mut f)?;
        }
        ControlFlow::Continue(())
    }
}

impl<I> IntoCursor for Chain<I>
where
    I: Iterator,
    I::Item: IntoCursor,
{
    type Cursor = ChainCursor<I, <I::Item as IntoCursor>::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        ChainCursor {
            producers: Some(self.0),
            current: None,
        }
    }
}

impl<I> Wrapper<I> for Chain<I> {
    fn into_inner(self) -> I {
        self.0
    }
}

/// The cursor of a [`Chain`]. Turns each producer into a cursor only once the previous one is exhausted.
#[derive(Debug)]
pub struct ChainCursor<I, C> {
    producers: Option<I>,
    current: Option<C>,
}

impl<I, C> Cursor for ChainCursor<I, C>
where
    I: Iterator,
    I::Item: IntoCursor<Cursor = C>,
    C: Cursor,
{
    type Item = C::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.advance() {
                    return Some(item);
                }
                self.current = None;
            }

            match self.producers.as_mut()?.next() {
                Some(producer) => self.current = Some(producer.into_cursor()),
                None => {
                    self.producers = None;
                    return None;
                }
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut current) = self.current.take() {
            current.release();
        }
        self.producers = None;
    }
}
