use core::ops::ControlFlow;

use wrapper::Wrapper;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// A producer of exactly one item, created with [`once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Once<T>(T);

/// Returns a producer that yields `item` and is then exhausted.
pub fn once<T>(item: T) -> Once<T> {
    Once(item)
}

impl<T> Producer for Once<T> {
    type Item = T;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        f(self.0)
    }
}

impl<T> IntoCursor for Once<T> {
    type Cursor = OnceCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        OnceCursor(Some(self.0))
    }
}

impl<T> Wrapper<T> for Once<T> {
    fn into_inner(self) -> T {
        self.0
    }
}

/// The cursor of a [`Once`] producer.
#[derive(Debug, Clone)]
pub struct OnceCursor<T>(Option<T>);

impl<T> Cursor for OnceCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        self.0.take()
    }

    fn release(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;

    #[test]
    fn yields_a_single_item() {
        assert_eq!(once('x').collect_vec(), vec!['x']);

        let mut cursor = once(3).into_cursor();
        assert_eq!(cursor.advance(), Some(3));
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn reports_a_stop_on_its_only_item() {
        assert_eq!(once(1).drive(|_| ControlFlow::Break(())), ControlFlow::Break(()));
    }
}
