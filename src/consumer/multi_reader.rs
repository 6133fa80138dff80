use std::io::{self, Read};

use crate::cursor::Cursor;
use crate::producer::IntoCursor;

/// Returns a reader over the concatenation of the readers produced by `producer`.
///
/// The readers are pulled lazily: the next one is only requested after the current one reached end of
/// file. Reading from the returned reader after the last reader ended keeps returning `Ok(0)`.
///
/// ```
/// use std::io::Read;
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::multi_reader;
///
/// let parts: [&[u8]; 3] = [b"con", b"", b"cat"];
/// let mut joined = String::new();
/// multi_reader(from_iter(parts)).read_to_string(&mut joined).unwrap();
/// assert_eq!(joined, "concat");
/// ```
pub fn multi_reader<P>(producer: P) -> MultiReader<P::Cursor>
where
    P: IntoCursor,
    P::Item: io::Read,
{
    MultiReader {
        readers: producer.into_cursor(),
        current: None,
    }
}

/// A reader that reads the readers of a cursor one after the other. Created with [`multi_reader`].
#[derive(Debug)]
pub struct MultiReader<C: Cursor> {
    readers: C,
    current: Option<C::Item>,
}

impl<C> MultiReader<C>
where
    C: Cursor,
    C::Item: io::Read,
{
    /// Stops reading: drops the current reader and releases the producer of readers. Every later read
    /// returns `Ok(0)`.
    pub fn close(&mut self) {
        self.current = None;
        self.readers.release();
    }
}

impl<C> io::Read for MultiReader<C>
where
    C: Cursor,
    C::Item: io::Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // An empty buffer would be indistinguishable from end of file below.
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            let Some(reader) = self.current.as_mut() else {
                match self.readers.advance() {
                    Some(next) => {
                        self.current = Some(next);
                        continue;
                    }
                    None => return Ok(0),
                }
            };

            match reader.read(buf) {
                Ok(0) => {
                    tracing::trace!("reader exhausted, moving on");
                    self.current = None;
                }
                result => return result,
            }
        }
    }
}
