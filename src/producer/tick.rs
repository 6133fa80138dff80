use core::cell::Cell;
use core::ops::ControlFlow;
use core::time::Duration;

use std::rc::Rc;
use std::thread;
use std::time::Instant;

use crate::cancel::Cancel;
use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Sleeps the current thread until `deadline`, if it lies in the future.
fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        thread::sleep(deadline - now);
    }
}

/// An endless producer of timestamps, one per period, created with [`tick`] or [`tick_until`].
#[derive(Debug, Clone)]
pub struct Tick {
    period: Duration,
    cancel: Cancel,
}

/// Returns a producer that yields the current [`Instant`] once every `period`, until its consumer stops
/// it.
///
/// The first tick fires one period after the traversal starts. A consumer that falls behind does not
/// receive a burst of stale ticks: deadlines that already passed are skipped, and the schedule continues
/// from the next future deadline. Waiting blocks the consuming thread.
///
/// #### Panics
///
/// Panics if `period` is zero.
pub fn tick(period: Duration) -> Tick {
    tick_until(period, Cancel::never())
}

/// Like [`tick`], but the producer ends as soon as `cancel` fires, even in the middle of waiting for the
/// next tick.
///
/// #### Panics
///
/// Panics if `period` is zero.
pub fn tick_until(period: Duration, cancel: Cancel) -> Tick {
    assert!(!period.is_zero(), "tick period must be positive");
    Tick { period, cancel }
}

impl Producer for Tick {
    type Item = Instant;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Instant) -> ControlFlow<()>,
    {
        let mut cursor = self.into_cursor();
        while let Some(at) = cursor.advance() {
            f(at)?;
        }
        ControlFlow::Continue(())
    }
}

impl IntoCursor for Tick {
    type Cursor = TickCursor;

    fn into_cursor(self) -> Self::Cursor {
        TickCursor {
            period: self.period,
            cancel: self.cancel,
            deadline: None,
            released: false,
        }
    }
}

/// The cursor of a [`Tick`] producer.
#[derive(Debug, Clone)]
pub struct TickCursor {
    period: Duration,
    cancel: Cancel,
    /// `None` until the first advance.
    deadline: Option<Instant>,
    released: bool,
}

impl Cursor for TickCursor {
    type Item = Instant;

    fn advance(&mut self) -> Option<Instant> {
        if self.released {
            return None;
        }

        let deadline = self
            .deadline
            .unwrap_or_else(|| Instant::now() + self.period);
        if self.cancel.wait_until(deadline) {
            tracing::trace!("tick cancelled");
            self.released = true;
            return None;
        }
        let fired = Instant::now();

        let mut next = deadline + self.period;
        let mut missed = 0u32;
        while next <= fired {
            next += self.period;
            missed += 1;
        }
        if missed > 0 {
            tracing::trace!(missed, "tick skipped missed deadlines");
        }

        self.deadline = Some(next);
        Some(fired)
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// A handle for scheduling the next firing of a [`timer`].
#[derive(Debug, Clone)]
pub struct Rearm(Rc<Cell<Option<Duration>>>);

impl Rearm {
    /// Schedules the next firing `delay` after the current one was handed out. Without this call, the
    /// timer ends after the current firing. Calling it again replaces the previous delay.
    pub fn after(&self, delay: Duration) {
        self.0.set(Some(delay));
    }
}

/// A one-shot timer that can be rearmed from within its consumer, created with [`timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    delay: Duration,
}

/// Returns a producer that fires once, `delay` after the traversal starts, yielding the firing time and a
/// [`Rearm`] handle.
///
/// The timer fires again only if the consumer calls [`Rearm::after`] before asking for the next item;
/// otherwise the producer is exhausted.
///
/// ```
/// use core::time::Duration;
/// use lazyseq::prelude::*;
///
/// let mut firings = 0;
/// timer(Duration::from_millis(1)).for_each(|(_at, rearm)| {
///     firings += 1;
///     if firings < 3 {
///         rearm.after(Duration::from_millis(1));
///     }
/// });
/// assert_eq!(firings, 3);
/// ```
pub fn timer(delay: Duration) -> Timer {
    Timer { delay }
}

impl Producer for Timer {
    type Item = (Instant, Rearm);

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>,
    {
        let mut cursor = self.into_cursor();
        while let Some(firing) = cursor.advance() {
            f(firing)?;
        }
        ControlFlow::Continue(())
    }
}

impl IntoCursor for Timer {
    type Cursor = TimerCursor;

    fn into_cursor(self) -> Self::Cursor {
        TimerCursor {
            pending: Rc::new(Cell::new(Some(self.delay))),
            released: false,
        }
    }
}

/// The cursor of a [`Timer`] producer.
#[derive(Debug)]
pub struct TimerCursor {
    /// Shared with the handed-out [`Rearm`] handles.
    pending: Rc<Cell<Option<Duration>>>,
    released: bool,
}

impl Cursor for TimerCursor {
    type Item = (Instant, Rearm);

    fn advance(&mut self) -> Option<Self::Item> {
        if self.released {
            return None;
        }

        let Some(delay) = self.pending.take() else {
            self.released = true;
            return None;
        };

        sleep_until(Instant::now() + delay);
        Some((Instant::now(), Rearm(self.pending.clone())))
    }

    fn release(&mut self) {
        self.released = true;
        self.pending.set(None);
    }
}
