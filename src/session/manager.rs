use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    credentials::{CredentialProvider, Credentials, PromptError},
    token::{AccessToken, TokenResponse},
};
use crate::data_aquisition::core::{ControllerRequest, ControllerTransport, TransportError};

/// Fatal failures of the authenticated phase.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The proxy path to the controller is broken; every further call would fail the same way.
    #[error("failed to authenticate on proxy {proxy}: {message}")]
    ProxyAuth { proxy: String, message: String },
    /// Token exchange answered without a usable `access_token`, usually a wrong password.
    #[error("no access token in controller answer (HTTP {status}), check the password: {body}")]
    Credential { status: u16, body: String },
    #[error("controller unreachable: {0}")]
    Unreachable(TransportError),
    #[error("topology query failed with HTTP {status}: {body}")]
    Query { status: u16, body: String },
    #[error("topology query failed: {0}")]
    QueryTransport(TransportError),
    #[error("topology query returned invalid JSON: {0}")]
    QueryDecode(String),
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

/// Revocation outcome that is reported but never fails the run.
#[derive(Debug, Error)]
pub enum RevocationWarning {
    #[error("token revocation answered HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("token revocation failed: {0}")]
    Transport(TransportError),
    #[error("no active session to revoke")]
    NoActiveSession,
}

/// `Unauthenticated --acquire--> Active --revoke (any outcome)--> Revoked`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Active(AccessToken),
    Revoked,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Active(_) => "active",
            SessionState::Revoked => "revoked",
        }
    }
}

/// Owns one short-lived controller session.
pub struct SessionManager<T: ControllerTransport> {
    transport: T,
    credentials: Credentials,
    state: SessionState,
}

impl<T: ControllerTransport> SessionManager<T> {
    /// Resolves the credentials once; they stay fixed for the lifetime of the session.
    pub fn new(transport: T, provider: &dyn CredentialProvider) -> Result<Self, PromptError> {
        let credentials = provider.credentials()?;
        Ok(Self {
            transport,
            credentials,
            state: SessionState::Unauthenticated,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Exchanges the Basic credentials for a bearer token.
    /// Failure is terminal: the session moves straight to `Revoked` and cannot be retried.
    pub async fn acquire_token(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Unauthenticated {
            return Err(SessionError::InvalidState {
                operation: "acquire a token",
                state: self.state.name(),
            });
        }
        // Whatever happens below, this session never returns to Unauthenticated.
        self.state = SessionState::Revoked;

        let request = ControllerRequest::IssueToken {
            authorization: self.credentials.basic_authorization(),
        };
        let response = self.transport.send(request).await.map_err(|e| match e {
            TransportError::Proxy { proxy, message } => SessionError::ProxyAuth { proxy, message },
            other => SessionError::Unreachable(other),
        })?;

        let token = TokenResponse::from_body(&response.body).ok_or_else(|| SessionError::Credential {
            status: response.status,
            body: response.body.clone(),
        })?;

        info!(user = self.credentials.username(), "acquired bearer token");
        self.state = SessionState::Active(AccessToken::new(token.access_token));
        Ok(())
    }

    /// One authenticated GET; the answer must be a complete JSON document.
    pub async fn query(&self, resource_path: &str) -> Result<Value, SessionError> {
        let SessionState::Active(token) = &self.state else {
            return Err(SessionError::InvalidState {
                operation: "query",
                state: self.state.name(),
            });
        };

        let request = ControllerRequest::FetchResource {
            bearer: token.secret().to_string(),
            path: resource_path.to_string(),
        };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(SessionError::QueryTransport)?;
        if !response.is_success() {
            return Err(SessionError::Query {
                status: response.status,
                body: response.body,
            });
        }
        debug!(path = resource_path, bytes = response.body.len(), "query answered");
        serde_json::from_str(&response.body).map_err(|e| SessionError::QueryDecode(e.to_string()))
    }

    /// Invalidates the token on the controller. The session is `Revoked` afterwards
    /// whether or not the controller accepted the call.
    pub async fn revoke_token(&mut self) -> Result<(), RevocationWarning> {
        let state = std::mem::replace(&mut self.state, SessionState::Revoked);
        let SessionState::Active(token) = state else {
            return Err(RevocationWarning::NoActiveSession);
        };

        let request = ControllerRequest::RevokeToken {
            authorization: self.credentials.basic_authorization(),
            token: token.secret().to_string(),
        };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(RevocationWarning::Transport)?;
        if response.status != 200 {
            return Err(RevocationWarning::Rejected {
                status: response.status,
                body: response.body,
            });
        }
        info!("Successfully revoked token.");
        Ok(())
    }

    /// acquire → query → revoke. Revocation is attempted whenever a token was issued,
    /// including when the query failed; its own failure is only logged.
    pub async fn run_authenticated(&mut self, resource_path: &str) -> Result<Value, SessionError> {
        self.acquire_token().await?;
        let result = self.query(resource_path).await;
        if let Err(warning) = self.revoke_token().await {
            warn!("{warning}");
        }
        result
    }
}
