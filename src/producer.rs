//! Push-style lazy sequences and their combinators.
//!
//! A [`Producer`] is a value describing how to generate a sequence. Nothing happens until it is
//! [driven](Producer::drive): the producer then passes each item to a continuation, in order, and stops
//! the moment the continuation returns [`ControlFlow::Break`]. Driving consumes the producer; producers
//! without hidden state implement `Clone`, and each clone traverses the sequence independently.
//!
//! A producer that implements [`IntoCursor`] can also be consumed one item at a time through a
//! [`Cursor`]. Every producer in this crate implements it. Most of them have a native cursor; arbitrary
//! push closures built with [`from_fn`] fall back to a [`ThreadCursor`](crate::cursor::ThreadCursor).
//!
//! ## Development Helpers
//!
//! The [`Invariant`] guard wraps the continuation handed to user-supplied push closures and makes it
//! panic during tests when a closure keeps emitting after being told to stop. In production builds it
//! compiles away. The [`TestProducer`] (feature `dev`) records how a producer was consumed, and can be
//! generated with [`arbitrary`](https://docs.rs/arbitrary) for fuzzing.

use core::ops::ControlFlow;

use crate::cursor::Cursor;

#[cfg(test)]
mod invariant;
#[cfg(not(test))]
mod invariant_noop;
#[cfg(test)]
pub use invariant::Invariant;
#[cfg(not(test))]
pub use invariant_noop::Invariant;

#[cfg(all(feature = "alloc", any(test, feature = "dev")))]
mod test_producer;
#[cfg(all(feature = "alloc", any(test, feature = "dev")))]
pub use test_producer::{Tally, TestCursor, TestProducer};

mod producer_ext;
pub use producer_ext::ProducerExt;

mod either;

mod empty;
pub use empty::{empty, Empty};

mod once;
pub use once::{once, Once, OnceCursor};

mod from_iter;
pub use from_iter::{from_iter, FromIter, IterCursor};

mod from_next;
pub use from_next::{from_next, FromNext, FromNextCursor};

mod repeat;
pub use repeat::{repeat, repeat_with, Repeat, RepeatCursor, RepeatWith, RepeatWithCursor};

mod cycle;
pub use cycle::{cycle, Cycle, CycleCursor};

mod range;
pub use range::{range, Range, RangeCursor, Step};

mod from_fn;
pub use from_fn::{from_fn, Emit, FromFn};

#[cfg(feature = "std")]
mod channel;
#[cfg(feature = "std")]
pub use channel::{
    from_channel, from_channel_until, ChannelCursor, ChannelUntilCursor, FromChannel, FromChannelUntil,
};

#[cfg(feature = "std")]
mod tick;
#[cfg(feature = "std")]
pub use tick::{tick, tick_until, timer, Rearm, Tick, TickCursor, Timer, TimerCursor};

mod chain;
pub use chain::{chain, Chain, ChainCursor};

mod skip;
pub use skip::{Skip, SkipCursor};

mod take;
pub use take::{Take, TakeCursor};

mod pairs;
pub use pairs::{Pairs, PairsCursor, PairsPadded, PairsPaddedCursor};

mod compact;
pub use compact::{Compact, CompactCursor};

mod enumerate;
pub use enumerate::{Enumerate, EnumerateCursor};

mod then;
pub use then::{Then, ThenCursor};

mod projections;
pub use projections::{Keys, KeysCursor, Values, ValuesCursor};

mod zip;
pub use zip::{Zip, ZipCursor, ZipLongest, ZipLongestCursor};

mod group_by;
pub use group_by::{ByKeyFn, ByPair, Group, GroupBy, Identity, Split};

/// A lazy, push-style sequence of items.
///
/// Driving a producer passes each item to the continuation `f`, strictly in order. Once `f` returns
/// [`ControlFlow::Break`], the producer must not call it again and must release any resource it holds
/// before returning. `drive` returns `Break` if and only if the consumer stopped it early, which lets
/// combinators such as [`chain`] tell exhaustion apart from a stop request.
///
/// Constructing a producer performs no work; all work happens while it is being driven.
pub trait Producer: Sized {
    /// The type of the items of the sequence.
    type Item;

    /// Runs the producer until it is exhausted or `f` asks it to stop.
    fn drive<F>(self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>;
}

/// A [`Producer`] that can be consumed on demand, one item at a time.
pub trait IntoCursor: Producer {
    /// The cursor that resumes this producer on every [`advance`](Cursor::advance).
    type Cursor: Cursor<Item = Self::Item>;

    /// Turns the producer into a cursor. Like constructing a producer, this performs no work yet.
    fn into_cursor(self) -> Self::Cursor;
}
