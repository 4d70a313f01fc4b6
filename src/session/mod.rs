use serde::Deserialize;
use tracing::{info, warn};

use crate::client::request::ApiRequest;
use crate::client::{ApiClient, IDENTITY_PATH, LOGOUT_PATH};

/// Outcome of the initial session check.
///
/// Only an explicit 401 counts as "not logged in". A 500 or a transport
/// failure yields `Indeterminate`: the caller keeps its loading state and may
/// retry, instead of being logged out over a transient backend outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated,
    Unauthenticated,
    Indeterminate,
}

#[derive(Debug, Deserialize)]
pub struct Me {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub access_token_exp: Option<i64>,
}

impl ApiClient {
    /// Probe the identity endpoint to classify the current session, and arm
    /// the pre-emptive renewal chain when the backend discloses an expiry.
    pub async fn check_session(&self) -> SessionStatus {
        let req = ApiRequest::get(IDENTITY_PATH).bypass_auth();
        match self.request(req).await {
            Ok(response) => {
                if let Ok(me) = response.json::<Me>() {
                    if let Some(expires_at) = me.access_token_exp {
                        self.schedule_pre_refresh(expires_at);
                    }
                }
                SessionStatus::Authenticated
            }
            Err(err) if err.is_authorization() => {
                info!("session check: not authenticated");
                self.store().clear().await;
                SessionStatus::Unauthenticated
            }
            Err(err) => {
                warn!("session check inconclusive: {}", err);
                SessionStatus::Indeterminate
            }
        }
    }

    /// End the session: tell the backend to drop the refresh cookie, then
    /// clear the local credential and disarm the renewal chain. The remote
    /// call is best-effort; local teardown happens regardless.
    pub async fn logout(&self) {
        let req = ApiRequest::post(LOGOUT_PATH).bypass_auth();
        if let Err(err) = self.request(req).await {
            warn!("logout call failed: {}", err);
        }
        self.cancel_pre_refresh();
        self.store().clear().await;
    }
}
