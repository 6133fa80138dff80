use core::fmt;
use core::mem;
use core::ops::ControlFlow;

use std::panic;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crate::cursor::Cursor;
use crate::producer::{Emit, Invariant};

/// A [`Cursor`] over an arbitrary push closure, which runs the closure on a dedicated driver thread.
///
/// A push closure cannot be suspended halfway through and resumed later, so this cursor runs it on its own
/// thread and hands control back and forth through two zero-capacity channels: the consumer requests an
/// item, the driver produces exactly one item and blocks until the next request. Exactly one of the two
/// sides runs at any time, so the closure observes the same sequential behaviour as when it is driven
/// directly.
///
/// The driver thread is spawned on the first call to [`advance`](Cursor::advance), never earlier. It has
/// terminated when [`release`](Cursor::release) returns, when `advance` reports exhaustion, and when the
/// cursor is dropped (including while unwinding a panic of the consumer). A panic inside the closure is
/// re-raised on the consumer's thread by the call that observes it.
pub struct ThreadCursor<G, T> {
    state: State<G, T>,
}

enum State<G, T> {
    /// Not started yet.
    Pending(G),
    /// The driver is blocked, waiting for the next resume request.
    Running(Driver<T>),
    /// Exhausted or released.
    Finished,
}

struct Driver<T> {
    resume: SyncSender<()>,
    items: Receiver<T>,
    handle: JoinHandle<()>,
}

impl<G, T> ThreadCursor<G, T>
where
    G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()> + Send + 'static,
    T: Send + 'static,
{
    /// Returns a cursor over the items that `generator` emits. The generator does not run until the first
    /// call to `advance`.
    pub fn new(generator: G) -> Self {
        ThreadCursor {
            state: State::Pending(generator),
        }
    }

    /// Waits for the driver to hand over its next item.
    fn receive(&mut self, driver: Driver<T>) -> Option<T> {
        match driver.items.recv() {
            Ok(item) => {
                self.state = State::Running(driver);
                Some(item)
            }
            Err(_) => {
                // The generator returned (or panicked) and dropped its end of the channel.
                driver.join();
                None
            }
        }
    }
}

impl<T: Send + 'static> Driver<T> {
    fn spawn<G>(generator: G) -> Self
    where
        G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()> + Send + 'static,
    {
        let (resume_tx, resume_rx) = sync_channel::<()>(0);
        let (item_tx, item_rx) = sync_channel::<T>(0);

        let handle = thread::spawn(move || {
            let mut guard = Invariant::new(|item: T| {
                if item_tx.send(item).is_err() {
                    return ControlFlow::Break(());
                }

                // Block until the consumer asks for the next item. A hung-up consumer means release.
                match resume_rx.recv() {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(_) => ControlFlow::Break(()),
                }
            });

            let _ = generator(&mut |item| guard.emit(item));
        });

        tracing::trace!("spawned producer driver thread");

        Driver {
            resume: resume_tx,
            items: item_rx,
            handle,
        }
    }
}

impl<T> Driver<T> {
    /// Hangs up on the driver and waits for its thread to finish.
    fn join(self) {
        let Driver {
            resume,
            items,
            handle,
        } = self;

        // A driver blocked in `send` or `recv` observes the hang-up and stops its generator.
        drop(resume);
        drop(items);

        match handle.join() {
            Ok(()) => tracing::trace!("producer driver thread joined"),
            Err(payload) => {
                tracing::debug!("producer driver thread panicked");
                if !thread::panicking() {
                    panic::resume_unwind(payload);
                }
            }
        }
    }
}

impl<G, T> Cursor for ThreadCursor<G, T>
where
    G: FnOnce(&mut Emit<'_, T>) -> ControlFlow<()> + Send + 'static,
    T: Send + 'static,
{
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        match mem::replace(&mut self.state, State::Finished) {
            State::Pending(generator) => {
                let driver = Driver::spawn(generator);
                self.receive(driver)
            }
            State::Running(driver) => {
                if driver.resume.send(()).is_err() {
                    driver.join();
                    return None;
                }
                self.receive(driver)
            }
            State::Finished => None,
        }
    }

    fn release(&mut self) {
        match mem::replace(&mut self.state, State::Finished) {
            State::Running(driver) => driver.join(),
            State::Pending(_) | State::Finished => {}
        }
    }
}

impl<G, T> Drop for ThreadCursor<G, T> {
    fn drop(&mut self) {
        if let State::Running(driver) = mem::replace(&mut self.state, State::Finished) {
            driver.join();
        }
    }
}

impl<G, T> fmt::Debug for ThreadCursor<G, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Pending(_) => "pending",
            State::Running(_) => "running",
            State::Finished => "finished",
        };
        f.debug_struct("ThreadCursor").field("state", &state).finish()
    }
}
