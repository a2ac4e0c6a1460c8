use async_trait::async_trait;
use thiserror::Error;

/// A single call against the controller's REST surface.
/// Carries only what the wire needs; the transport decides how to frame it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerRequest {
    /// Client-credentials grant, authorized with Basic framing.
    IssueToken { authorization: String },
    /// Authenticated GET of a RESTCONF resource.
    FetchResource { bearer: String, path: String },
    /// Token revocation, authorized with Basic framing (not the bearer itself).
    RevokeToken { authorization: String, token: String },
}

impl ControllerRequest {
    /// Short label for logs, never includes credentials.
    pub fn label(&self) -> &'static str {
        match self {
            ControllerRequest::IssueToken { .. } => "token",
            ControllerRequest::FetchResource { .. } => "query",
            ControllerRequest::RevokeToken { .. } => "revocation",
        }
    }
}

/// Status and body of a controller answer, whatever the status was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The configured proxy refused or failed the connection.
    #[error("proxy error via {proxy}: {message}")]
    Proxy { proxy: String, message: String },
    #[error("connection error: {0}")]
    Connect(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("transport error: {0}")]
    Other(String),
}

/// Represents a client that can talk to the controller.
#[async_trait]
pub trait ControllerTransport: Send + Sync {
    async fn send(&self, request: ControllerRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: ControllerTransport + ?Sized> ControllerTransport for std::sync::Arc<T> {
    async fn send(&self, request: ControllerRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}
