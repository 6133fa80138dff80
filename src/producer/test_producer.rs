use core::cell::Cell;
use core::ops::ControlFlow;

use alloc::rc::Rc;
use alloc::vec::{self, Vec};

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Invariant, Producer};

/// Shared record of how a [`TestProducer`] has been consumed so far.
#[derive(Debug, Default)]
pub struct Tally {
    produced: Cell<usize>,
    releases: Cell<usize>,
    started: Cell<bool>,
}

impl Tally {
    /// How many items were handed out, across all traversals.
    pub fn produced(&self) -> usize {
        self.produced.get()
    }

    /// How many traversals ended, by exhaustion, early stop, release or drop.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Whether any traversal has begun.
    pub fn started(&self) -> bool {
        self.started.get()
    }

    fn produce(&self) {
        self.produced.set(self.produced.get() + 1);
    }

    fn release(&self) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// A producer over a fixed vector of items that records, in a shared [`Tally`], how often it was
/// advanced and whether it was released.
#[derive(Debug, Clone)]
pub struct TestProducer<T> {
    items: Vec<T>,
    tally: Rc<Tally>,
}

impl<T> TestProducer<T> {
    pub fn new(items: Vec<T>) -> Self {
        TestProducer {
            items,
            tally: Rc::new(Tally::default()),
        }
    }

    /// Returns a handle to the tally that stays readable after the producer was consumed.
    pub fn tally(&self) -> Rc<Tally> {
        self.tally.clone()
    }

    pub fn peek_items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Producer for TestProducer<T> {
    type Item = T;

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        let mut guard = Invariant::new(f);
        self.tally.started.set(true);

        for item in self.items {
            self.tally.produce();
            if guard.emit(item).is_break() {
                self.tally.release();
                return ControlFlow::Break(());
            }
        }

        self.tally.release();
        ControlFlow::Continue(())
    }
}

impl<T> IntoCursor for TestProducer<T> {
    type Cursor = TestCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        TestCursor {
            items: self.items.into_iter(),
            tally: self.tally,
            done: false,
        }
    }
}

/// The cursor of a [`TestProducer`]. Counts exactly one release per traversal.
#[derive(Debug)]
pub struct TestCursor<T> {
    items: vec::IntoIter<T>,
    tally: Rc<Tally>,
    done: bool,
}

impl<T> Cursor for TestCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        if self.done {
            return None;
        }

        self.tally.started.set(true);
        match self.items.next() {
            Some(item) => {
                self.tally.produce();
                Some(item)
            }
            None => {
                self.done = true;
                self.tally.release();
                None
            }
        }
    }

    fn release(&mut self) {
        if !self.done {
            self.done = true;
            self.tally.release();
        }
    }
}

impl<T> Drop for TestCursor<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "dev")]
impl<'a, T> Arbitrary<'a> for TestProducer<T>
where
    T: Arbitrary<'a>,
{
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(TestProducer::new(Arbitrary::arbitrary(u)?))
    }
}
