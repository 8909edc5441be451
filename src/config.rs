use thiserror::Error;
use url::Url;

use crate::hosts::{Host, HostRegistry};
use crate::probe::AUTH_PATH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub hosts: HostRegistry,
    pub node: NodeConfig,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout for outbound credential checks (seconds)
    pub timeout_seconds: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_seconds: 5 }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let hosts = parse_hosts(&std::env::var("HOSTS").unwrap_or_default())?;

        let timeout_seconds = std::env::var("PROBE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let config = Config {
            hosts,
            node: NodeConfig { bind_address },
            probe: ProbeConfig { timeout_seconds },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            tracing::warn!(
                "No hosts configured. Every credential check will be rejected. \
                 Set HOSTS to a comma-separated list of name=url pairs."
            );
        }

        Ok(())
    }
}

/// Parse the `HOSTS` value: comma-separated `name=url` pairs.
///
/// Endpoints must be absolute http(s) URLs and must not already contain
/// the auth path; trailing slashes are stripped so the auth path can be
/// appended verbatim. Names must be non-empty and unique.
pub fn parse_hosts(value: &str) -> Result<HostRegistry, ConfigError> {
    let mut hosts = Vec::new();

    for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, endpoint) = entry.split_once('=').ok_or_else(|| {
            ConfigError::ValidationError(format!("Host entry '{entry}' is not a name=url pair"))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Host entry '{entry}' has an empty name"
            )));
        }
        if hosts.iter().any(|h: &Host| h.name == name) {
            return Err(ConfigError::ValidationError(format!(
                "Duplicate host name '{name}'"
            )));
        }

        let endpoint = endpoint.trim().trim_end_matches('/');
        let url = Url::parse(endpoint).map_err(|e| {
            ConfigError::ValidationError(format!("Host '{name}' endpoint is not a valid URL: {e}"))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "Host '{name}' endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if endpoint.contains(AUTH_PATH.trim_end_matches('/')) {
            return Err(ConfigError::ValidationError(format!(
                "Host '{name}' endpoint must not include the auth path (it is appended automatically)"
            )));
        }

        hosts.push(Host::new(name, endpoint));
    }

    Ok(HostRegistry::new(hosts))
}
