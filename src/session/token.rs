use std::fmt::Debug;

use serde::Deserialize;
use serde_json::Value;

/// Opaque bearer string issued by the controller.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(<redacted>)")
    }
}

/// Body of a successful token exchange.
/// Refresh metadata is accepted but never used, since a run never refreshes.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub refresh_token: Option<Value>,
    #[allow(dead_code)]
    pub expires_in: Option<Value>,
}

impl TokenResponse {
    /// Returns `None` when the body is not JSON or carries no string `access_token`.
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: TokenResponse = serde_json::from_str(body).ok()?;
        if parsed.access_token.is_empty() {
            return None;
        }
        Some(parsed)
    }
}
