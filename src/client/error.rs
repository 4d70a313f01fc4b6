use http::StatusCode;
use thiserror::Error;

/// Failure taxonomy for outbound API calls.
///
/// `Authorization` marks a credential the server refused (401); on normal
/// data requests it is intercepted by the refresh pipeline and the caller
/// only ever sees it as the final verdict of a failed renewal. `Network`
/// and `Server` are never retried here and propagate directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authorization failed: {status}")]
    Authorization { status: StatusCode },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server error: {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Authorization { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}
