use serde::Deserialize;

pub const SAFETY_MARGIN_SECONDS_DEFAULT: u64 = 60;
pub const REQUEST_TIMEOUT_MS_DEFAULT: u64 = 5000;

/// ================================
/// Client-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the Ani Updater backend, e.g. `http://localhost:8000`
    pub api_url: String,
    /// Seconds before expiry at which a credential is renewed pre-emptively
    pub safety_margin_seconds: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    /// Durable slot for the access credential; in-memory only when absent
    pub credential_path: Option<std::path::PathBuf>,
    pub logging: Option<LoggingConfig>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            safety_margin_seconds: None,
            request_timeout_ms: None,
            credential_path: None,
            logging: None,
        }
    }

    pub fn safety_margin_seconds(&self) -> u64 {
        self.safety_margin_seconds
            .unwrap_or(SAFETY_MARGIN_SECONDS_DEFAULT)
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(REQUEST_TIMEOUT_MS_DEFAULT)
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
