//! Fixed-period refresh scheduling
//!
//! The poller fires a tick immediately and then once per period until its handle
//! is cancelled. A failing tick never stops the schedule: ticks return nothing,
//! so errors must be handled inside them.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Source of delays (gloo-timers in the browser)
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Cancels a running poller; clones share the same flag
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    cancelled: Rc<Cell<bool>>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Repeating task with a cancellable handle
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
    handle: PollHandle,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: PollHandle::default(),
        }
    }

    pub fn handle(&self) -> PollHandle {
        self.handle.clone()
    }

    /// Run ticks until cancelled, or until `max_ticks` have fired
    ///
    /// Returns the number of ticks that ran.
    pub async fn run<F, Fut>(&self, timer: &dyn Timer, max_ticks: Option<usize>, mut tick: F) -> usize
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticks = 0;
        loop {
            if self.handle.is_cancelled() || max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
            tick(ticks).await;
            ticks += 1;

            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
            timer.sleep(self.interval).await;
        }
        tracing::debug!(ticks, cancelled = self.handle.is_cancelled(), "poller stopped");
        ticks
    }
}
