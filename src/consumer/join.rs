use core::fmt;

#[cfg(feature = "std")]
use std::io::{self, Read};

use crate::consumer::{sink_failed, try_drive};
use crate::{Producer, SinkError};

#[cfg(feature = "std")]
const COPY_BUFFER_SIZE: usize = 32 * 1024;

/// Writes the items of `producer` to `dst`, with `sep` between consecutive items. Returns the number of
/// bytes written.
///
/// ```
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::join_strings;
///
/// let mut csv = String::new();
/// let written = join_strings(from_iter(["a", "bc", "d"]), &mut csv, ", ").unwrap();
/// assert_eq!(csv, "a, bc, d");
/// assert_eq!(written, 8);
/// ```
pub fn join_strings<P, W>(producer: P, dst: &mut W, sep: &str) -> Result<u64, SinkError<fmt::Error>>
where
    P: Producer,
    P::Item: AsRef<str>,
    W: fmt::Write,
{
    let mut written = 0;
    let mut first = true;

    let result = try_drive(producer, |item| {
        if !first {
            dst.write_str(sep)?;
            written += sep.len() as u64;
        }
        first = false;

        let item = item.as_ref();
        dst.write_str(item)?;
        written += item.len() as u64;
        Ok(())
    });

    match result {
        Ok(()) => Ok(written),
        Err(reason) => Err(sink_failed(written, reason)),
    }
}

/// Writes the byte slices of `producer` to `dst`, with `sep` between consecutive slices. Returns the
/// number of bytes written; on failure, the error reports how many bytes made it into `dst`.
#[cfg(feature = "std")]
pub fn join_bytes<P, W>(producer: P, dst: &mut W, sep: &[u8]) -> Result<u64, SinkError<io::Error>>
where
    P: Producer,
    P::Item: AsRef<[u8]>,
    W: io::Write,
{
    let mut written = 0;
    let mut first = true;

    let result = try_drive(producer, |item| {
        if !first {
            write_counted(dst, sep, &mut written)?;
        }
        first = false;
        write_counted(dst, item.as_ref(), &mut written)
    });

    match result {
        Ok(()) => Ok(written),
        Err(reason) => Err(sink_failed(written, reason)),
    }
}

/// Copies every reader of `producer` to `dst` until it reaches end of file, with `sep` between
/// consecutive readers. Returns the number of bytes written.
///
/// Fails on the first error of a reader or of `dst`, without touching the remaining readers.
///
/// ```
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::join_readers;
///
/// let mut out = Vec::new();
/// let sources: [&[u8]; 3] = [b"ab", b"", b"cd"];
/// join_readers(from_iter(sources), &mut out, b"\n").unwrap();
/// assert_eq!(out, b"ab\n\ncd");
/// ```
#[cfg(feature = "std")]
pub fn join_readers<P, W>(producer: P, dst: &mut W, sep: &[u8]) -> Result<u64, SinkError<io::Error>>
where
    P: Producer,
    P::Item: io::Read,
    W: io::Write,
{
    let mut written = 0;
    let mut first = true;
    let mut buf: Vec<u8> = Vec::new();

    let result = try_drive(producer, |mut reader| {
        if !first {
            write_counted(dst, sep, &mut written)?;
        }
        first = false;

        if buf.is_empty() {
            buf = vec![0; COPY_BUFFER_SIZE];
        }

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            write_counted(dst, &buf[..n], &mut written)?;
        }
    });

    match result {
        Ok(()) => Ok(written),
        Err(reason) => Err(sink_failed(written, reason)),
    }
}

/// Like [`io::Write::write_all`], but keeps `written` up to date after every partial write.
#[cfg(feature = "std")]
fn write_counted<W: io::Write>(dst: &mut W, mut buf: &[u8], written: &mut u64) -> io::Result<()> {
    while !buf.is_empty() {
        match dst.write(buf) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => {
                *written += n as u64;
                buf = &buf[n..];
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor as IoCursor;

    use crate::prelude::*;

    /// Accepts at most `capacity` bytes, a few at a time.
    struct Cramped {
        data: Vec<u8>,
        capacity: usize,
    }

    impl io::Write for Cramped {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.data.len();
            if room == 0 {
                return Err(io::Error::other("full"));
            }
            let n = buf.len().min(room).min(3);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("broken"))
        }
    }

    #[test]
    fn join_strings_separates() {
        let mut out = String::new();
        assert_eq!(join_strings(empty::<&str>(), &mut out, ","), Ok(0));
        assert_eq!(out, "");

        assert_eq!(join_strings(once("solo"), &mut out, ","), Ok(4));
        assert_eq!(out, "solo");

        out.clear();
        let parts = from_iter(["x", "", "y"]);
        assert_eq!(join_strings(parts, &mut out, "--"), Ok(6));
        assert_eq!(out, "x----y");
    }

    #[test]
    fn join_bytes_counts_partial_writes() {
        let mut sink = Cramped {
            data: Vec::new(),
            capacity: 7,
        };
        let chunks: [&[u8]; 3] = [b"hello", b"big", b"world"];
        let err = join_bytes(from_iter(chunks), &mut sink, b" ").unwrap_err();

        assert_eq!(err.written, 7);
        assert_eq!(err.reason.kind(), io::ErrorKind::Other);
        assert_eq!(sink.data, b"hello b");
    }

    #[test]
    fn join_bytes_writes_everything() {
        let mut out = Vec::new();
        let written = join_bytes(from_iter([vec![1u8, 2], vec![3]]), &mut out, &[0]).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, [1, 2, 0, 3]);
    }

    #[test]
    fn join_readers_copies_large_readers() {
        let big: Vec<u8> = (0..100_000u32).map(|i| i as u8).collect();
        let mut out = Vec::new();

        let readers = from_iter([IoCursor::new(big.clone()), IoCursor::new(b"tail".to_vec())]);
        let written = join_readers(readers, &mut out, b"|").unwrap();

        assert_eq!(written, big.len() as u64 + 5);
        assert_eq!(&out[..big.len()], &big[..]);
        assert_eq!(&out[big.len()..], b"|tail");
    }

    #[test]
    fn join_readers_stops_at_failing_reader() {
        let mut out = Vec::new();
        let readers = from_iter([
            Box::new(&b"ok"[..]) as Box<dyn Read>,
            Box::new(Failing),
            Box::new(&b"never"[..]),
        ]);

        let err = join_readers(readers, &mut out, b"+").unwrap_err();
        assert_eq!(err.written, 3);
        assert_eq!(err.reason.to_string(), "broken");
        assert_eq!(out, b"ok+");
    }
}
