use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Short-lived bearer credential plus its expiry, as reported by the server.
///
/// `expires_at` is absent when the backend never disclosed one; such a
/// credential is still attached to outbound calls but cannot drive the
/// pre-emptive renewal chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: Option<i64>, // UNIX timestamp
}

impl Credential {
    pub fn new(token: String, expires_at: Option<i64>) -> Self {
        Self { token, expires_at }
    }

    /// Whether the credential is already past its declared expiry.
    /// A credential without an expiry is treated as fresh; the server
    /// remains the authority via 401.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => Utc::now().timestamp() >= exp,
            None => false,
        }
    }
}
