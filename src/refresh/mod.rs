pub mod coordinator;
pub mod notifier;
pub mod scheduler;

pub use coordinator::{RefreshCoordinator, RefreshOutcome, RefreshTicket};
pub use notifier::{InvalidCallback, InvalidationNotifier};
pub use scheduler::PreRefreshScheduler;
