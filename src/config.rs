/*!
Run configuration.

Everything the core needs to reach the controller is passed in explicitly through
`ControllerConfig`; nothing here reads the process environment.
*/

use std::{fmt::Display, path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_OUTPUT_FILE: &str = "data.clab.yaml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid proxy '{0}': {1}")]
    InvalidProxy(String, String),
    #[error("server address must not be empty")]
    EmptyServer,
}

/// A single HTTP proxy applied to every controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    url: Url,
}

impl ProxyEndpoint {
    /// Accepts `host:port` (used as `http://host:port`) or a full URL,
    /// optionally carrying `user:pass@` for authenticating proxies.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let candidate = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };
        let url = Url::parse(&candidate)
            .map_err(|e| ConfigError::InvalidProxy(raw.to_string(), e.to_string()))?;
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidProxy(raw.to_string(), "missing host".to_string()));
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Shows the proxy with its password masked.
impl Display for ProxyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut shown = self.url.clone();
        if shown.password().is_some() {
            let _ = shown.set_password(Some("***"));
        }
        write!(f, "{}", shown.as_str().trim_end_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller host (name or address, optionally with `:port`).
    pub server: String,
    pub proxy: Option<ProxyEndpoint>,
    /// Upper bound for each network call.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(server: &str, proxy: Option<ProxyEndpoint>, timeout: Duration) -> Result<Self, ConfigError> {
        let server = server.trim().trim_end_matches('/');
        if server.is_empty() {
            return Err(ConfigError::EmptyServer);
        }
        Ok(Self {
            server: server.to_string(),
            proxy,
            timeout,
        })
    }

    /// `https://<server><path>`
    pub fn url_for(&self, path: &str) -> String {
        format!("https://{}{}", self.server, path)
    }
}

/// Output destination, defaulting to `data.clab.yaml` in the working directory.
pub fn resolve_output_path(output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
}
