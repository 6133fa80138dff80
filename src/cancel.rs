//! Cancellation signals for the blocking sources and sinks.
//!
//! A channel or timer bridge may block its consumer for a long time: a channel whose senders are alive but
//! idle never disconnects, and a ticker sleeps for a full period. The `_until` variants
//! ([`from_channel_until`](crate::producer::from_channel_until),
//! [`tick_until`](crate::producer::tick_until), [`send_all_until`](crate::consumer::send_all_until)) also
//! watch a [`Cancel`] signal, and end cleanly as soon as it fires, even while blocked.
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//! use lazyseq::cancel::cancel_pair;
//! use lazyseq::prelude::*;
//! use lazyseq::producer::tick_until;
//!
//! let (canceller, cancel) = cancel_pair();
//! thread::spawn(move || {
//!     thread::sleep(Duration::from_millis(5));
//!     canceller.cancel();
//! });
//!
//! // Without the signal, this would sleep for an hour.
//! assert!(tick_until(Duration::from_secs(3600), cancel).collect_vec().is_empty());
//! ```

use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Returns a connected pair of a [`Canceller`] and the [`Cancel`] signal it fires.
pub fn cancel_pair() -> (Canceller, Cancel) {
    let (hang_up, signal) = crossbeam_channel::bounded(0);
    (Canceller(hang_up), Cancel(signal))
}

/// Fires the [`Cancel`] signals of its pair, created with [`cancel_pair`].
///
/// Dropping the canceller fires the signal as well.
#[derive(Debug)]
pub struct Canceller(Sender<()>);

impl Canceller {
    /// Fires the signal. Every clone of the paired [`Cancel`] observes it, now and later.
    pub fn cancel(self) {
        tracing::trace!("cancel signal fired");
        drop(self.0);
    }
}

/// A signal that a [`Canceller`] fires once. Cheap to clone; all clones observe the same firing.
#[derive(Debug, Clone)]
pub struct Cancel(pub(crate) Receiver<()>);

impl Cancel {
    /// A signal that never fires.
    pub fn never() -> Self {
        Cancel(crossbeam_channel::never())
    }

    /// Whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.0.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Blocks until `deadline` passes or the signal fires, whichever happens first. Returns `true` if the
    /// signal fired.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        !matches!(self.0.recv_deadline(deadline), Err(RecvTimeoutError::Timeout))
    }
}
