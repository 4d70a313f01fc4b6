use std::sync::{Arc, Mutex};

use tracing::debug;

pub type InvalidCallback = Arc<dyn Fn() + Send + Sync>;

/// Single-slot registry for the "session can no longer be renewed"
/// notification. Last registration wins; firing with an empty slot is a
/// no-op. Redundant fires are allowed, so subscribers must be idempotent.
#[derive(Default)]
pub struct InvalidationNotifier {
    slot: Mutex<Option<InvalidCallback>>,
}

impl InvalidationNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_invalid(&self, callback: Option<InvalidCallback>) {
        *self.slot.lock().unwrap() = callback;
    }

    pub fn fire_invalid(&self) {
        // clone out of the slot so a subscriber may re-register from inside
        // its own callback without deadlocking
        let callback = self.slot.lock().unwrap().clone();
        match callback {
            Some(callback) => callback(),
            None => debug!("session invalidated with no subscriber registered"),
        }
    }
}

impl std::fmt::Debug for InvalidationNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self.slot.lock().unwrap().is_some();
        f.debug_struct("InvalidationNotifier")
            .field("registered", &registered)
            .finish()
    }
}
