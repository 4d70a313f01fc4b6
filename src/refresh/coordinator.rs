use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::debug;

/// Terminal verdict of one renewal attempt, broadcast to every caller that
/// queued behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Renewed,
    Invalidated,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    refreshing: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

/// Single-flight gate for credential renewal.
///
/// The first caller to observe an authorization failure becomes the driver
/// and performs the renewal call itself; everyone arriving while the flag is
/// set gets a oneshot receiver and waits. The check of the flag and the
/// queue append happen under one lock with no await inside, so two callers
/// failing in the same tick can never both start a renewal.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<CoordinatorState>,
}

pub enum RefreshTicket {
    Driver,
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> RefreshTicket {
        let mut state = self.state.lock().unwrap();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            debug!("renewal already in flight, queueing caller ({} queued)", state.waiters.len());
            RefreshTicket::Waiter(rx)
        } else {
            state.refreshing = true;
            RefreshTicket::Driver
        }
    }

    /// Settle every queued waiter with `outcome` and return to `Idle`.
    ///
    /// The driver must have written the renewed credential to the store
    /// before calling this: waiters replay as soon as they wake, and none of
    /// them may observe the stale credential. Waiters that abandoned their
    /// request are skipped silently. Returns the number of waiters drained.
    pub fn finish(&self, outcome: RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.state.lock().unwrap();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        let drained = waiters.len();
        for waiter in waiters {
            // send fails only when the caller dropped its future; that
            // cancels the one caller, never the shared renewal
            let _ = waiter.send(outcome);
        }
        drained
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.lock().unwrap().refreshing
    }
}
