use crate::config::settings::ClientConfig;
use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let raw = fs::read_to_string(path)?;
    let mut config: ClientConfig = serde_yaml::from_str(&raw)?;

    if config.api_url.trim().is_empty() {
        bail!("api_url must not be empty");
    }

    // Apply defaults
    if config.safety_margin_seconds.is_none() {
        config.safety_margin_seconds = Some(60);
    }

    if let Some(retry_margin) = config.safety_margin_seconds {
        if retry_margin > 24 * 60 * 60 {
            bail!("safety_margin_seconds '{}' exceeds one day", retry_margin);
        }
    }

    Ok(config)
}
