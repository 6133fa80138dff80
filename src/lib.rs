#![cfg_attr(not(feature = "std"), no_std)]

//! Composable lazy sequences built on a single producer/consumer protocol.
//!
//! A [`Producer`] is a push-style generator: when [driven](Producer::drive), it hands each item to a
//! continuation, and stops as soon as that continuation returns [`ControlFlow::Break`]. Any producer
//! that implements [`IntoCursor`] can also be turned into a demand-driven [`Cursor`], which hands out
//! one item per call to [`advance`](Cursor::advance) and can be abandoned early with
//! [`release`](Cursor::release).
//!
//! The combinators on [`ProducerExt`] are built on top of these two views. Linear combinators such as
//! [`take`](ProducerExt::take) or [`compact`](ProducerExt::compact) wrap a producer and push items
//! through. Lockstep combinators ([`zip`](ProducerExt::zip), [`zip_longest`](ProducerExt::zip_longest))
//! and the [grouping engine](producer::GroupBy) pull from cursors so that several logical consumers can
//! interleave their progress over one stream.
//!
//! ```
//! use core::ops::ControlFlow;
//! use lazyseq::prelude::*;
//!
//! let words = from_iter(["apple", "apricot", "banana", "blueberry", "cherry"]);
//!
//! let mut out = Vec::new();
//! let _ = words
//!     .group_by(|word: &&str| word.as_bytes()[0])
//!     .for_each_group(|initial, group| {
//!         out.push((initial as char, group.collect_vec()));
//!         ControlFlow::Continue(())
//!     });
//!
//! assert_eq!(out, vec![
//!     ('a', vec!["apple", "apricot"]),
//!     ('b', vec!["banana", "blueberry"]),
//!     ('c', vec!["cherry"]),
//! ]);
//! ```
//!
//! ## Fundamental Design Choices
//!
//! - Nothing happens at construction time; all work is deferred until a producer is driven or a cursor advanced.
//! - Early stop is a normal control path (`ControlFlow::Break`), never an error.
//! - Cursors release their producer on every exit path: exhaustion, [`release`](Cursor::release), or `Drop`.
//! - Groups borrow the grouping engine, so the borrow checker enforces consuming a group before moving on.
//!
//! ## Module Overview
//!
//! The [`producer`] module defines the [`Producer`] and [`IntoCursor`] traits, sources and combinators.
//! The [`cursor`] module defines the [`Cursor`] trait and the thread-backed fallback cursor for push
//! closures. The [`consumer`] module holds the collectors that drain producers into containers,
//! channels and writers. The [`cancel`] module provides the signal that interrupts blocking channel and
//! timer bridges.

#[cfg(feature = "alloc")]
extern crate alloc;

use core::ops::ControlFlow;

mod errors;
pub use errors::*;

pub mod producer;
pub use producer::{IntoCursor, Producer, ProducerExt};

pub mod cursor;
pub use cursor::{Cursor, CursorExt};

pub mod consumer;

#[cfg(feature = "std")]
pub mod cancel;

/// A "prelude" for crates using the `lazyseq` crate.
///
/// Import its entire contents with:
///
/// use lazyseq::prelude::*;
pub mod prelude {
    pub use crate::cursor::{Cursor, CursorExt};
    pub use crate::producer::{
        chain, cycle, empty, from_fn, from_iter, from_next, once, range, repeat, repeat_with,
        IntoCursor, Producer, ProducerExt,
    };

    #[cfg(feature = "std")]
    pub use crate::producer::{from_channel, tick, timer};

    pub use either::Either::{self, Left, Right};
}

/// Drives `producer` with `f`, converting the boolean "keep going" convention into a [`ControlFlow`].
///
/// ```
/// use lazyseq::prelude::*;
///
/// let mut seen = 0;
/// lazyseq::drive_while(from_iter(1..), |n| {
///     seen = n;
///     n < 5
/// });
/// assert_eq!(seen, 5);
/// ```
pub fn drive_while<P, F>(producer: P, mut f: F) -> ControlFlow<()>
where
    P: Producer,
    F: FnMut(P::Item) -> bool,
{
    producer.drive(|item| {
        if f(item) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
}
