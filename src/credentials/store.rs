use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::credentials::credential::Credential;

/// Single-slot credential store.
///
/// Holds at most one live [`Credential`]; `set` replaces, never merges.
/// When constructed with a path, the slot is mirrored to a JSON file so a
/// restarted process resumes the session without re-authenticating.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<Credential>>>,
    path: Option<PathBuf>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            path: Some(path),
        }
    }

    /// Populate the slot from the durable file, if one is configured and
    /// present. An unreadable or malformed file leaves the slot empty.
    pub async fn load(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match tokio::fs::read(path).await {
            Ok(raw) => match serde_json::from_slice::<Credential>(&raw) {
                Ok(credential) => {
                    debug!("credential restored from {}", path.display());
                    *self.inner.write().await = Some(credential);
                }
                Err(err) => {
                    warn!("stored credential at {} is malformed: {}", path.display(), err);
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!("reading credential from {} failed: {}", path.display(), err);
            }
        }
    }

    pub async fn get(&self) -> Option<Credential> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, credential: Credential) {
        if let Some(path) = &self.path {
            match serde_json::to_vec(&credential) {
                Ok(raw) => {
                    if let Err(err) = tokio::fs::write(path, raw).await {
                        warn!("persisting credential to {} failed: {}", path.display(), err);
                    }
                }
                Err(err) => warn!("serializing credential failed: {}", err),
            }
        }
        *self.inner.write().await = Some(credential);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!("removing credential file {} failed: {}", path.display(), err),
            }
        }
    }
}
