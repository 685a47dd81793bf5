use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{ClientSettings, LogFormat, LoggingConfig};
use crate::utils::constants::{ENV_BASE_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET};

/// Load and validate settings from a YAML file.
///
/// `${VAR}` and `${VAR:default}` are expanded from the environment before
/// parsing, so secrets can stay out of the file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ClientSettings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    parse_settings(&expand_env_vars(&content))
}

pub fn parse_settings(content: &str) -> Result<ClientSettings> {
    let mut settings: ClientSettings = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::default());
    }

    debug!("validating config ...");
    validate_settings(&settings)?;
    Ok(settings)
}

/// Settings from `EVERSEND_CLIENT_ID`, `EVERSEND_CLIENT_SECRET` and the
/// optional `EVERSEND_BASE_URL`.
pub fn settings_from_env() -> Result<ClientSettings> {
    let client_id = std::env::var(ENV_CLIENT_ID).map_err(|e| anyhow!("{}: {}", ENV_CLIENT_ID, e))?;
    let client_secret =
        std::env::var(ENV_CLIENT_SECRET).map_err(|e| anyhow!("{}: {}", ENV_CLIENT_SECRET, e))?;

    let mut settings = ClientSettings::new(client_id, client_secret);
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        settings.base_url = base_url;
    }
    settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::from_env()));

    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &ClientSettings) -> Result<()> {
    if settings.client_id.trim().is_empty() {
        bail!("client_id must not be empty");
    }
    if settings.client_secret.trim().is_empty() {
        bail!("client_secret must not be empty");
    }
    let base_url = reqwest::Url::parse(settings.base_url.trim())
        .map_err(|e| anyhow!("invalid base_url '{}': {}", settings.base_url, e))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        bail!("base_url must be http or https, got '{}'", base_url.scheme());
    }
    if settings.request_timeout_ms == Some(0) {
        bail!("request_timeout_ms must be greater than zero");
    }
    Ok(())
}

fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env var pattern is valid");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
