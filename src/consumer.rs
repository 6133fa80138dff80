//! Collectors that drain producers into containers, channels and writers.
//!
//! Collectors are the terminal step of a pipeline: they drive a producer to exhaustion and put its items
//! somewhere. The ones writing to a fallible sink stop at the first failure and report it as a
//! [`SinkError`], together with how many units reached the sink before.
//!
//! The most common collectors are also available as [`ProducerExt`](crate::ProducerExt) methods.

use core::fmt::Display;
use core::ops::ControlFlow;

use crate::{Producer, SinkError};

mod collect;
#[cfg(feature = "alloc")]
pub use collect::collect_vec;
pub use collect::{collect_into, collect_keys, drain, max, min};

mod join;
pub use join::join_strings;
#[cfg(feature = "std")]
pub use join::{join_bytes, join_readers};

#[cfg(feature = "std")]
mod channel;
#[cfg(feature = "std")]
pub use channel::{send_all, send_all_until, ChannelSender};

#[cfg(feature = "std")]
mod multi_reader;
#[cfg(feature = "std")]
pub use multi_reader::{multi_reader, MultiReader};

/// Drives `producer` with a fallible function, stopping at the first error.
fn try_drive<P, E, F>(producer: P, mut f: F) -> Result<(), E>
where
    P: Producer,
    F: FnMut(P::Item) -> Result<(), E>,
{
    let mut failure = None;
    let _ = producer.drive(|item| match f(item) {
        Ok(()) => ControlFlow::Continue(()),
        Err(err) => {
            failure = Some(err);
            ControlFlow::Break(())
        }
    });

    match failure {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

fn sink_failed<E: Display>(written: u64, reason: E) -> SinkError<E> {
    tracing::debug!(written, %reason, "sink failed");
    SinkError { written, reason }
}
