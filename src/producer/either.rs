use core::ops::ControlFlow;

use either::Either::{self, Left, Right};

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

impl<L, R> Producer for Either<L, R>
where
    L: Producer,
    R: Producer<Item = L::Item>,
{
    type Item = L::Item;

    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        match self {
            Left(p) => p.drive(f),
            Right(p) => p.drive(f),
        }
    }
}

impl<L, R> IntoCursor for Either<L, R>
where
    L: IntoCursor,
    R: IntoCursor<Item = L::Item>,
{
    type Cursor = Either<L::Cursor, R::Cursor>;

    fn into_cursor(self) -> Self::Cursor {
        match self {
            Left(p) => Left(p.into_cursor()),
            Right(p) => Right(p.into_cursor()),
        }
    }
}

impl<L, R> Cursor for Either<L, R>
where
    L: Cursor,
    R: Cursor<Item = L::Item>,
{
    type Item = L::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        match self {
            Left(c) => c.advance(),
            Right(c) => c.advance(),
        }
    }

    fn release(&mut self) {
        match self {
            Left(c) => c.release(),
            Right(c) => c.release(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;

    fn evens_or_odds(even: bool) -> Either<impl IntoCursor<Item = u8>, impl IntoCursor<Item = u8>> {
        if even {
            Left(from_iter([0, 2, 4]))
        } else {
            Right(range(1, 6, 2))
        }
    }

    #[test]
    fn drives_the_active_side() {
        assert_eq!(evens_or_odds(true).collect_vec(), vec![0, 2, 4]);
        assert_eq!(evens_or_odds(false).collect_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn cursor_of_the_active_side() {
        let mut cursor = evens_or_odds(false).into_cursor();
        assert_eq!(cursor.advance(), Some(1));
        cursor.release();
        assert_eq!(cursor.advance(), None);
    }
}
