use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::StatusCode;
use reqwest::Client;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::error::ApiError;
use crate::client::request::{ApiRequest, ApiResponse};
use crate::credentials::CredentialStore;

/// Tracks in-flight calls for the global busy indicator. Incremented when a
/// dispatch starts and decremented on every exit path via [`BusyGuard`], so
/// the count never goes negative and returns to zero after the last call,
/// errors included.
#[derive(Debug)]
pub struct BusyCounter {
    count: AtomicUsize,
    tx: watch::Sender<bool>,
}

impl BusyCounter {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            count: AtomicUsize::new(0),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn in_flight(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn enter(self: &Arc<Self>) -> BusyGuard {
        let previous = self.count.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            let _ = self.tx.send(true);
        }
        BusyGuard {
            counter: self.clone(),
        }
    }
}

impl Default for BusyCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BusyGuard {
    counter: Arc<BusyCounter>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let previous = self.counter.count.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 {
            let _ = self.counter.tx.send(false);
        }
    }
}

/// The only component that talks to the network. Attaches the current
/// credential as a bearer header, maps the response into the [`ApiError`]
/// taxonomy and drives the busy counter. Refresh semantics live one layer
/// up; the dispatcher itself never retries anything.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
    base_url: String,
    store: CredentialStore,
    busy: Arc<BusyCounter>,
}

impl Dispatcher {
    pub fn new(http: Client, base_url: String, store: CredentialStore) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            busy: Arc::new(BusyCounter::new()),
        }
    }

    pub fn busy(&self) -> &Arc<BusyCounter> {
        &self.busy
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub async fn dispatch(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let _busy = self.busy.enter();

        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self.http.request(req.method.clone(), &url);

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        if let Some(credential) = self.store.get().await {
            builder = builder.bearer_auth(&credential.token);
        }

        debug!("dispatch {} {}", req.method, req.path);
        let response = builder.send().await.map_err(|err| {
            warn!("transport failure on {} {}: {}", req.method, req.path, err);
            ApiError::Network(err)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ApiError::Network)?.to_vec();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Authorization { status });
        }
        if !status.is_success() {
            return Err(ApiError::Server {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
