use std::sync::mpsc::{SendError, Sender, SyncSender};

use crate::cancel::Cancel;
use crate::consumer::{sink_failed, try_drive};
use crate::{Producer, SinkError};

/// The sending half of a [`std::sync::mpsc`] channel, either [`Sender`] or [`SyncSender`].
pub trait ChannelSender<T> {
    /// Sends `value`, blocking on a full bounded channel. Fails if the receiver has hung up.
    fn send(&self, value: T) -> Result<(), SendError<T>>;
}

impl<T> ChannelSender<T> for Sender<T> {
    fn send(&self, value: T) -> Result<(), SendError<T>> {
        Sender::send(self, value)
    }
}

impl<T> ChannelSender<T> for SyncSender<T> {
    fn send(&self, value: T) -> Result<(), SendError<T>> {
        SyncSender::send(self, value)
    }
}

/// Sends every item of `producer` on `sender`, returning how many items were sent.
///
/// Stops the producer as soon as the receiver hangs up; the error then carries the item that could not be
/// delivered. The sender is borrowed, so the channel stays open after this returns.
///
/// ```
/// use std::sync::mpsc::channel;
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::send_all;
///
/// let (tx, rx) = channel();
/// assert_eq!(send_all(range(0, 3, 1), &tx), Ok(3));
/// drop(tx);
/// assert_eq!(rx.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub fn send_all<P, S>(producer: P, sender: &S) -> Result<u64, SinkError<SendError<P::Item>>>
where
    P: Producer,
    S: ChannelSender<P::Item>,
{
    let mut written = 0;

    let result = try_drive(producer, |item| {
        sender.send(item)?;
        written += 1;
        Ok(())
    });

    match result {
        Ok(()) => Ok(written),
        Err(reason) => Err(sink_failed(written, reason)),
    }
}

/// Sends every item of `producer` on a [`crossbeam_channel`] `sender` until the producer is exhausted or
/// `cancel` fires, returning how many items were sent.
///
/// Cancellation interrupts a send that is blocked on a full channel; the item that was waiting is dropped
/// and the function returns the count so far. It is a clean stop, not an error. Only a hung-up receiver
/// is reported as a failure, carrying the undelivered item.
pub fn send_all_until<P>(
    producer: P,
    sender: &crossbeam_channel::Sender<P::Item>,
    cancel: &Cancel,
) -> Result<u64, SinkError<crossbeam_channel::SendError<P::Item>>>
where
    P: Producer,
{
    let mut written = 0;

    // `Err(None)` marks cancellation.
    let result = try_drive(producer, |item| {
        if cancel.is_cancelled() {
            return Err(None);
        }

        crossbeam_channel::select! {
            send(sender, item) -> sent => sent.map_err(Some)?,
            recv(cancel.0) -> _ => return Err(None),
        }
        written += 1;
        Ok(())
    });

    match result {
        Ok(()) => Ok(written),
        Err(None) => {
            tracing::trace!(written, "sending cancelled");
            Ok(written)
        }
        Err(Some(reason)) => Err(sink_failed(written, reason)),
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
    use crate::producer::TestProducer;

    #[test]
    fn sends_to_a_bounded_channel() {
        let (tx, rx) = sync_channel(1);
        let reader = thread::spawn(move || rx.iter().collect::<Vec<_>>());

        assert_eq!(send_all(from_iter("abc".chars()), &tx), Ok(3));
        drop(tx);
        assert_eq!(reader.join().unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn stops_when_the_receiver_hangs_up() {
        let (tx, rx) = channel();
        drop(rx);

        let producer = TestProducer::new(vec![1, 2, 3]);
        let tally = producer.tally();

        let err = send_all(producer, &tx).unwrap_err();
        assert_eq!(err.written, 0);
        assert_eq!(err.into_reason().0, 1);
        assert_eq!(tally.produced(), 1);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn counts_items_sent_before_the_hang_up() {
        let (tx, rx) = sync_channel(0);
        let reader = thread::spawn(move || {
            let first = rx.recv().unwrap();
            let second = rx.recv().unwrap();
            (first, second)
        });

        let err = send_all(range(10u32, 20, 1), &tx).unwrap_err();
        assert_eq!(reader.join().unwrap(), (10, 11));
        assert_eq!(err.written, 2);
        assert_eq!(err.reason.0, 12);
    }

    #[test]
    fn cancelling_unblocks_a_full_channel() {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let (canceller, cancel) = cancel_pair();
        let start = Instant::now();
        let firing = thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            canceller.cancel();
        });

        // Nobody receives, but the receiver stays alive.
        assert_eq!(send_all_until(repeat(7u8), &tx, &cancel), Ok(0));
        assert!(start.elapsed() < Duration::from_secs(60));
        firing.join().unwrap();
        drop(rx);
    }

    #[test]
    fn cancelling_keeps_the_count() {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let (canceller, cancel) = cancel_pair();
        let reader = thread::spawn(move || {
            let received = (rx.recv().unwrap(), rx.recv().unwrap());
            canceller.cancel();
            (received, rx)
        });

        let sent = send_all_until(range(0u32, 100, 1), &tx, &cancel);
        let (received, _rx) = reader.join().unwrap();
        assert_eq!(received, (0, 1));
        assert_eq!(sent, Ok(2));
    }

    #[test]
    fn until_reports_hang_ups() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let (_canceller, cancel) = cancel_pair();

        let producer = TestProducer::new(vec![4, 5]);
        let tally = producer.tally();
        let err = send_all_until(producer, &tx, &cancel).unwrap_err();
        assert_eq!(err.written, 0);
        assert_eq!(err.into_reason().into_inner(), 4);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn until_sends_everything_without_cancel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        assert_eq!(send_all_until(from_iter("abc".chars()), &tx, &Cancel::never()), Ok(3));
        drop(tx);
        assert_eq!(rx.iter().collect::<String>(), "abc");
    }
}
