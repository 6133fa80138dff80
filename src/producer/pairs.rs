use core::convert::{AsMut, AsRef};
use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer adaptor that yields consecutive, non-overlapping pairs of items. A trailing unpaired item is
/// dropped.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct Pairs<P> {
    inner: P,
}

impl<P> Pairs<P> {
    pub fn new(inner: P) -> Self {
        Pairs { inner }
    }
}

impl<P> AsRef<P> for Pairs<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Pairs<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Pairs<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Producer> Producer for Pairs<P> {
    type Item = (P::Item, P::Item);

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut first = None;
        self.inner.drive(|item| match first.take() {
            None => {
                first = Some(item);
                ControlFlow::Continue(())
            }
            Some(a) => f((a, item)),
        })
    }
}

impl<P: IntoCursor> IntoCursor for Pairs<P> {
    type Cursor = PairsCursor<P::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        PairsCursor {
            inner: self.inner.into_cursor(),
        }
    }
}

/// The cursor of a [`Pairs`] adaptor.
#[derive(Clone, Debug)]
pub struct PairsCursor<C> {
    inner: C,
}

impl<C: Cursor> Cursor for PairsCursor<C> {
    type Item = (C::Item, C::Item);

    fn advance(&mut self) -> Option<Self::Item> {
        let a = self.inner.advance()?;
        let b = self.inner.advance()?;
        Some((a, b))
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

/// A producer adaptor that yields consecutive, non-overlapping pairs of items, pairing a trailing
/// unpaired item with a padding value.
#[derive(Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub struct PairsPadded<P, T> {
    inner: P,
    pad: T,
}

impl<P, T> PairsPadded<P, T> {
    pub fn new(inner: P, pad: T) -> Self {
        PairsPadded { inner, pad }
    }
}

impl<P, T> AsRef<P> for PairsPadded<P, T> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P, T> AsMut<P> for PairsPadded<P, T> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P, T> Wrapper<P> for PairsPadded<P, T> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P, T> Producer for PairsPadded<P, T>
where
    P: Producer<Item = T>,
{
    type Item = (T, T);

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut first = None;
        self.inner.drive(|item| match first.take() {
            None => {
                first = Some(item);
                ControlFlow::Continue(())
            }
            Some(a) => f((a, item)),
        })?;

        match first {
            Some(a) => f((a, self.pad)),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<P, T> IntoCursor for PairsPadded<P, T>
where
    P: IntoCursor<Item = T>,
{
    type Cursor = PairsPaddedCursor<P::Cursor, T>;

    fn into_cursor(self) -> Self::Cursor {
        PairsPaddedCursor {
            inner: self.inner.into_cursor(),
            pad: Some(self.pad),
        }
    }
}

/// The cursor of a [`PairsPadded`] adaptor.
#[derive(Clone, Debug)]
pub struct PairsPaddedCursor<C, T> {
    inner: C,
    /// Taken by the trailing pair, if there is one.
    pad: Option<T>,
}

impl<C, T> Cursor for PairsPaddedCursor<C, T>
where
    C: Cursor<Item = T>,
{
    type Item = (T, T);

    fn advance(&mut self) -> Option<Self::Item> {
        let a = self.inner.advance()?;
        let b = self.inner.advance().or_else(|| self.pad.take())?;
        Some((a, b))
    }

    fn release(&mut self) {
        self.inner.release();
        self.pad = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::producer::TestProducer;

    #[test]
    fn drops_a_trailing_item() {
        assert_eq!(from_iter([1, 2, 3, 4, 5]).pairs().collect_vec(), vec![(1, 2), (3, 4)]);
        assert_eq!(
            from_iter([1, 2, 3, 4, 5]).pairs().into_cursor().iter().collect::<Vec<_>>(),
            vec![(1, 2), (3, 4)]
        );
        assert_eq!(from_iter([1, 2]).pairs().collect_vec(), vec![(1, 2)]);
        assert!(once(1).pairs().collect_vec().is_empty());
    }

    #[test]
    fn pads_a_trailing_item() {
        let expected = vec![(1, 2), (3, 4), (5, 0)];
        assert_eq!(from_iter([1, 2, 3, 4, 5]).pairs_padded(0).collect_vec(), expected);
        assert_eq!(
            from_iter([1, 2, 3, 4, 5]).pairs_padded(0).into_cursor().iter().collect::<Vec<_>>(),
            expected
        );
    }

    #[test]
    fn even_counts_need_no_padding() {
        assert_eq!(from_iter([1, 2, 3, 4]).pairs_padded(0).collect_vec(), vec![(1, 2), (3, 4)]);
        assert!(empty::<u8>().pairs_padded(0).collect_vec().is_empty());
    }

    #[test]
    fn stopping_after_the_first_pair_releases_the_source() {
        let producer = TestProducer::new(vec![1, 2, 3, 4, 5, 6]);
        let tally = producer.tally();

        assert_eq!(producer.pairs_padded(0).take(1).collect_vec(), vec![(1, 2)]);
        assert_eq!(tally.produced(), 2);
        assert_eq!(tally.releases(), 1);
    }
}
