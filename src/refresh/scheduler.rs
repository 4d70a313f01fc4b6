use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::helpers::time::now_i64;

/// One renewal pass of the pre-emptive chain. Returns the next expiry to arm
/// for, or `None` to stop the chain (renewal failed, or no expiry could be
/// discovered and only reactive refresh remains).
pub type RenewFn =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = Option<i64>> + Send>> + Send + Sync>;

/// Arms at most one renewal timer ahead of credential expiry.
///
/// `arm` replaces (and aborts) any previously armed timer, so there is never
/// more than one outstanding chain system-wide. The armed task keeps renewing
/// and re-sleeping on its own for as long as each pass yields a next expiry
/// outside the safety margin.
#[derive(Debug)]
pub struct PreRefreshScheduler {
    safety_margin_seconds: u64,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PreRefreshScheduler {
    pub fn new(safety_margin_seconds: u64) -> Self {
        Self {
            safety_margin_seconds,
            handle: Mutex::new(None),
        }
    }

    pub fn safety_margin_seconds(&self) -> u64 {
        self.safety_margin_seconds
    }

    /// Arm a timer for `expires_at - safety_margin`. Does nothing and returns
    /// false when that instant is already in the past; the credential is in
    /// its danger window and the reactive path handles it on the next call.
    pub fn arm(&self, expires_at: i64, renew: RenewFn) -> bool {
        let mut slot = self.handle.lock().unwrap();
        // dispose the previous timer first, even when nothing replaces it:
        // arming for an expiry inside the margin must not leave a timer for
        // the old expiry outstanding
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let margin = self.safety_margin_seconds as i64;
        let first_delay = expires_at - now_i64() - margin;
        if first_delay <= 0 {
            debug!(
                "expiry {} is within the {}s safety margin, nothing scheduled",
                expires_at, margin
            );
            return false;
        }

        *slot = Some(tokio::spawn(async move {
            let mut delay = first_delay as u64;
            loop {
                tokio::time::sleep(Duration::from_secs(delay)).await;
                info!("pre-emptive renewal timer fired");
                let Some(next_expiry) = renew().await else {
                    break;
                };
                let next_delay = next_expiry - now_i64() - margin;
                if next_delay <= 0 {
                    debug!("renewed expiry {} already within safety margin, chain stops", next_expiry);
                    break;
                }
                delay = next_delay as u64;
            }
        }));
        true
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .unwrap()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn cancel(&self) {
        if let Some(previous) = self.handle.lock().unwrap().take() {
            previous.abort();
        }
    }
}

impl Drop for PreRefreshScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
