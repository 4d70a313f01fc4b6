//! # Ani Updater API Client
//!
//! Authenticated HTTP client for the Ani Updater backend. The interesting
//! part is the credential lifecycle: an authorization failure on any data
//! request triggers exactly one renewal no matter how many calls fail
//! concurrently, every suspended caller is replayed with the renewed
//! credential, and a timer renews the credential ahead of expiry for as long
//! as the session stays valid. When renewal becomes impossible, a single-slot
//! subscriber is notified so the UI can send the user back to sign-in.
//!
//! Modules:
//! - `config` — YAML client configuration
//! - `credentials` — single-slot credential store with a durable mirror
//! - `client` — dispatcher, error taxonomy and the interception pipeline
//! - `refresh` — single-flight coordinator, pre-emptive scheduler, notifier
//! - `session` — initial session check and logout
//! - `api` — typed list endpoints (anime updates, news, scheduled tasks)

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod helpers;
pub mod refresh;
pub mod session;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::client::error::ApiError;
pub use crate::client::request::{ApiRequest, ApiResponse};
pub use crate::client::ApiClient;
pub use crate::config::loader::load_config;
pub use crate::config::settings::ClientConfig;
pub use crate::credentials::{Credential, CredentialStore};
pub use crate::session::SessionStatus;
