pub mod dispatcher;
pub mod error;
pub mod request;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::dispatcher::Dispatcher;
use crate::client::error::ApiError;
use crate::client::request::{ApiRequest, ApiResponse};
use crate::config::settings::ClientConfig;
use crate::credentials::{Credential, CredentialStore};
use crate::refresh::{
    InvalidCallback, InvalidationNotifier, PreRefreshScheduler, RefreshCoordinator,
    RefreshOutcome, RefreshTicket,
};

pub use dispatcher::BusyCounter;

pub const REFRESH_PATH: &str = "/auth/refresh";
pub const IDENTITY_PATH: &str = "/api/me";
pub const LOGOUT_PATH: &str = "/logout";

/// Fields of interest in a renewal response. Both are optional: a
/// cookie-session backend may renew without handing out a bearer token, and
/// the expiry may have to be discovered through the identity probe instead.
#[derive(Debug, Default, Deserialize)]
struct RefreshBody {
    access_token: Option<String>,
    access_token_exp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ProbeBody {
    access_token_exp: Option<i64>,
}

#[derive(Debug)]
struct ClientInner {
    dispatcher: Dispatcher,
    coordinator: RefreshCoordinator,
    scheduler: PreRefreshScheduler,
    notifier: InvalidationNotifier,
}

/// Authenticated API client for the Ani Updater backend.
///
/// All outbound traffic funnels through one instance: the dispatcher attaches
/// the current credential, an authorization failure on a normal data request
/// is transparently converted into a single-flight renewal plus replay, and a
/// successful renewal re-arms the pre-emptive timer chain. Cheap to clone;
/// clones share all state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true) // carries the HttpOnly refresh cookie
            .timeout(Duration::from_millis(config.request_timeout_ms()))
            .build()?;

        let store = match &config.credential_path {
            Some(path) => CredentialStore::with_path(path.clone()),
            None => CredentialStore::new(),
        };
        store.load().await;

        Ok(Self {
            inner: Arc::new(ClientInner {
                dispatcher: Dispatcher::new(http, config.api_url.clone(), store),
                coordinator: RefreshCoordinator::new(),
                scheduler: PreRefreshScheduler::new(config.safety_margin_seconds()),
                notifier: InvalidationNotifier::new(),
            }),
        })
    }

    pub fn store(&self) -> &CredentialStore {
        self.inner.dispatcher.store()
    }

    /// Global busy indicator: true while any call is in flight.
    pub fn busy_watch(&self) -> watch::Receiver<bool> {
        self.inner.dispatcher.busy().subscribe()
    }

    pub fn in_flight(&self) -> usize {
        self.inner.dispatcher.busy().in_flight()
    }

    /// Register (or clear, with `None`) the single invalidation subscriber.
    pub fn set_on_invalid(&self, callback: Option<InvalidCallback>) {
        self.inner.notifier.set_on_invalid(callback);
    }

    /// The session cannot be renewed: drop the dead credential (and its
    /// durable mirror) before notifying the subscriber, so neither a replay
    /// nor a restarted process ever picks it up again.
    async fn invalidate(&self) {
        self.store().clear().await;
        self.inner.notifier.fire_invalid();
    }

    /// Issue a request through the full pipeline.
    ///
    /// A 401 on a normal data request makes this caller either drive a
    /// renewal or queue behind the one already in flight; the caller only
    /// ever observes the replayed result or the final authorization error.
    /// Bypass-flagged requests skip interception entirely.
    pub async fn request(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        match self.inner.dispatcher.dispatch(&req).await {
            Err(err) if err.is_authorization() && !req.bypass_auth => {
                self.recover(req, err).await
            }
            other => other,
        }
    }

    async fn recover(
        &self,
        req: ApiRequest,
        original: ApiError,
    ) -> Result<ApiResponse, ApiError> {
        let retry = req.mark_retried();
        match self.inner.coordinator.enter() {
            RefreshTicket::Driver => {
                info!("credential rejected on {} {}, driving renewal", retry.method, retry.path);
                match self.renew().await {
                    Ok(expires_at) => {
                        // store is already updated: write-then-drain
                        let drained = self.inner.coordinator.finish(RefreshOutcome::Renewed);
                        info!("renewal succeeded, {} queued caller(s) released", drained);
                        if let Some(expires_at) = expires_at {
                            self.schedule_pre_refresh(expires_at);
                        }
                        self.replay(retry).await
                    }
                    Err(renew_err) => {
                        warn!("renewal failed: {}", renew_err);
                        self.inner.coordinator.finish(RefreshOutcome::Invalidated);
                        self.invalidate().await;
                        Err(original)
                    }
                }
            }
            RefreshTicket::Waiter(outcome) => match outcome.await {
                Ok(RefreshOutcome::Renewed) => self.replay(retry).await,
                // invalidated, or the driver vanished: the session is gone
                _ => Err(original),
            },
        }
    }

    /// Reissue a request that already went through one renewal. A second 401
    /// here is terminal: the renewed credential is still refused, so the
    /// session is invalid and the refresh path must not be re-entered.
    async fn replay(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        match self.inner.dispatcher.dispatch(&req).await {
            Err(err) if err.is_authorization() => {
                warn!("replayed {} {} still unauthorized", req.method, req.path);
                self.invalidate().await;
                Err(err)
            }
            other => other,
        }
    }

    /// The renewal primitive shared by the reactive path and the pre-emptive
    /// chain. Calls the refresh endpoint in bypass mode, stores any returned
    /// credential, and reports the next expiry when one could be discovered.
    pub(crate) async fn renew(&self) -> Result<Option<i64>, ApiError> {
        let req = ApiRequest::post(REFRESH_PATH).bypass_auth();
        let response = self.inner.dispatcher.dispatch(&req).await?;

        // an empty or non-JSON body means a pure cookie renewal
        let body: RefreshBody = serde_json::from_slice(&response.body).unwrap_or_default();

        if let Some(token) = &body.access_token {
            self.store()
                .set(Credential::new(token.clone(), body.access_token_exp))
                .await;
        }

        let mut expires_at = body.access_token_exp;
        if expires_at.is_none() {
            expires_at = self.probe_expiry().await?;
            if let (Some(exp), Some(token)) = (expires_at, body.access_token) {
                self.store().set(Credential::new(token, Some(exp))).await;
            }
        }
        Ok(expires_at)
    }

    /// Expiry-discovery fallback: ask the identity endpoint. A 401 here means
    /// the renewed session is already invalid and propagates; any other
    /// failure degrades to "no expiry known" and the chain simply stops.
    async fn probe_expiry(&self) -> Result<Option<i64>, ApiError> {
        let req = ApiRequest::get(IDENTITY_PATH).bypass_auth();
        match self.inner.dispatcher.dispatch(&req).await {
            Ok(response) => Ok(response
                .json::<ProbeBody>()
                .ok()
                .and_then(|body| body.access_token_exp)),
            Err(err) if err.is_authorization() => Err(err),
            Err(err) => {
                warn!("expiry probe failed, pre-emptive renewal disabled: {}", err);
                Ok(None)
            }
        }
    }

    /// Arm (or re-arm) the pre-emptive renewal chain for `expires_at`.
    /// Returns false when the expiry is already inside the safety margin.
    pub fn schedule_pre_refresh(&self, expires_at: i64) -> bool {
        let client = self.clone();
        self.inner.scheduler.arm(
            expires_at,
            Box::new(move || {
                let client = client.clone();
                let pass: Pin<Box<dyn Future<Output = Option<i64>> + Send>> =
                    Box::pin(async move {
                        match client.renew().await {
                            Ok(next_expiry) => next_expiry,
                            Err(err) => {
                                warn!("scheduled renewal failed: {}", err);
                                client.invalidate().await;
                                None
                            }
                        }
                    });
                pass
            }),
        )
    }

    pub fn pre_refresh_armed(&self) -> bool {
        self.inner.scheduler.is_armed()
    }

    pub fn cancel_pre_refresh(&self) {
        self.inner.scheduler.cancel();
    }
}
