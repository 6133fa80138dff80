use core::ops::ControlFlow;

use std::sync::mpsc::Receiver;

use wrapper::Wrapper;

use crate::cancel::Cancel;
use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Produces the values received on a [`std::sync::mpsc`] channel, created with [`from_channel`].
#[derive(Debug)]
pub struct FromChannel<T>(Receiver<T>);

/// Returns a producer of the values received on `receiver`, ending once every sender has hung up and the
/// channel is empty.
///
/// Waiting for the next value blocks the consuming thread. Stopping the producer (or releasing its cursor)
/// drops the receiver, so that senders observe a disconnected channel.
///
/// ```
/// use std::sync::mpsc::channel;
/// use std::thread;
/// use lazyseq::prelude::*;
///
/// let (tx, rx) = channel();
/// thread::spawn(move || {
///     for i in 0..3 {
///         tx.send(i).unwrap();
///     }
/// });
///
/// assert_eq!(from_channel(rx).collect_vec(), vec![0, 1, 2]);
/// ```
pub fn from_channel<T>(receiver: Receiver<T>) -> FromChannel<T> {
    FromChannel(receiver)
}

impl<T> Producer for FromChannel<T> {
    type Item = T;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        for item in self.0 {
            f(item)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T> IntoCursor for FromChannel<T> {
    type Cursor = ChannelCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        ChannelCursor(Some(self.0))
    }
}

impl<T> Wrapper<Receiver<T>> for FromChannel<T> {
    fn into_inner(self) -> Receiver<T> {
        self.0
    }
}

/// The cursor of a [`FromChannel`] producer.
#[derive(Debug)]
pub struct ChannelCursor<T>(Option<Receiver<T>>);

impl<T> Cursor for ChannelCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        match self.0.as_ref()?.recv() {
            Ok(item) => Some(item),
            Err(_) => {
                tracing::trace!("channel disconnected");
                self.0 = None;
                None
            }
        }
    }

    fn release(&mut self) {
        self.0 = None;
    }
}

/// Produces the values received on a [`crossbeam_channel`] until the channel disconnects or a [`Cancel`]
/// signal fires. Created with [`from_channel_until`].
#[derive(Debug)]
pub struct FromChannelUntil<T> {
    receiver: crossbeam_channel::Receiver<T>,
    cancel: Cancel,
}

/// Returns a producer of the values received on `receiver`, ending once every sender has hung up and the
/// channel is empty, or once `cancel` fires.
///
/// Cancellation interrupts a blocked wait, so the producer also ends while senders are alive but idle. Once
/// the signal has fired, no further value is taken from the channel.
///
/// ```
/// use lazyseq::cancel::cancel_pair;
/// use lazyseq::prelude::*;
/// use lazyseq::producer::from_channel_until;
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// let (canceller, cancel) = cancel_pair();
///
/// tx.send("ping").unwrap();
/// let mut seen = Vec::new();
/// let mut canceller = Some(canceller);
/// from_channel_until(rx, cancel).for_each(|msg| {
///     seen.push(msg);
///     // `tx` is still alive, only the signal ends the producer.
///     if let Some(canceller) = canceller.take() {
///         canceller.cancel();
///     }
/// });
/// assert_eq!(seen, vec!["ping"]);
/// ```
pub fn from_channel_until<T>(
    receiver: crossbeam_channel::Receiver<T>,
    cancel: Cancel,
) -> FromChannelUntil<T> {
    FromChannelUntil { receiver, cancel }
}

impl<T> Producer for FromChannelUntil<T> {
    type Item = T;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        let mut cursor = self.into_cursor();
        while let Some(item) = cursor.advance() {
            f(item)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T> IntoCursor for FromChannelUntil<T> {
    type Cursor = ChannelUntilCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        ChannelUntilCursor {
            receiver: Some(self.receiver),
            cancel: self.cancel,
        }
    }
}

/// The cursor of a [`FromChannelUntil`] producer.
#[derive(Debug)]
pub struct ChannelUntilCursor<T> {
    receiver: Option<crossbeam_channel::Receiver<T>>,
    cancel: Cancel,
}

impl<T> Cursor for ChannelUntilCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        let receiver = self.receiver.as_ref()?;

        let item = if self.cancel.is_cancelled() {
            tracing::trace!("channel cancelled");
            None
        } else {
            crossbeam_channel::select! {
                recv(receiver) -> msg => match msg {
                    Ok(item) => Some(item),
                    Err(_) => {
                        tracing::trace!("channel disconnected");
                        None
                    }
                },
                recv(self.cancel.0) -> _ => {
                    tracing::trace!("channel cancelled");
                    None
                },
            }
        };

        if item.is_none() {
            self.receiver = None;
        }
        item
    }

    fn release(&mut self) {
        self.receiver = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::mpsc::{channel, sync_channel};
    use std::thread;

    use std::time::{Duration, Instant};

    use crate::cancel::cancel_pair;
    use crate::prelude::*;

    #[test]
    fn ends_when_senders_hang_up() {
        let (tx, rx) = channel();
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        drop(tx);

        let mut cursor = from_channel(rx).into_cursor();
        assert_eq!(cursor.advance(), Some(1));
        assert_eq!(cursor.advance(), Some(2));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn stopping_disconnects_the_senders() {
        let (tx, rx) = sync_channel(0);
        let sender = thread::spawn(move || {
            let mut sent = 0;
            while tx.send(sent).is_ok() {
                sent += 1;
            }
            sent
        });

        assert_eq!(from_channel(rx).take(3).collect_vec(), vec![0, 1, 2]);
        assert!(sender.join().unwrap() >= 3);
    }

    #[test]
    fn cancelling_ends_a_blocked_wait() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let (canceller, cancel) = cancel_pair();
        tx.send(1).unwrap();
        tx.send(2).unwrap();

        let start = Instant::now();
        let firing = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            canceller.cancel();
        });

        // The sender stays alive throughout, so only the signal can end the traversal.
        assert_eq!(from_channel_until(rx, cancel).collect_vec(), vec![1, 2]);
        assert!(start.elapsed() < Duration::from_secs(60));
        firing.join().unwrap();
        drop(tx);
    }

    #[test]
    fn cancelled_channels_yield_nothing() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let (canceller, cancel) = cancel_pair();
        tx.send(1).unwrap();
        canceller.cancel();

        let mut cursor = from_channel_until(rx, cancel).into_cursor();
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(tx.len(), 1);
    }

    #[test]
    fn uncancelled_channels_end_on_hang_up() {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let sender = thread::spawn(move || {
            for i in 0..3 {
                tx.send(i).unwrap();
            }
        });

        let values = from_channel_until(rx, Cancel::never()).collect_vec();
        assert_eq!(values, vec![0, 1, 2]);
        sender.join().unwrap();
    }

    #[test]
    fn releasing_disconnects_the_senders() {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let (_canceller, cancel) = cancel_pair();
        let sender = thread::spawn(move || {
            let mut sent = 0;
            while tx.send(sent).is_ok() {
                sent += 1;
            }
            sent
        });

        assert_eq!(from_channel_until(rx, cancel).take(2).collect_vec(), vec![0, 1]);
        assert!(sender.join().unwrap() >= 2);
    }
}
