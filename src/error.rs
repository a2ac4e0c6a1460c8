use thiserror::Error;

use crate::{
    config::ConfigError,
    data_aquisition::core::TransportError,
    output::OutputError,
    session::{PromptError, SessionError},
    topology::SchemaError,
};

/// Everything that can end a run unsuccessfully.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("failed to set up controller client: {0}")]
    Client(TransportError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl RunError {
    /// Name of the failure kind, as shown in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::Config(_) => "ConfigError",
            RunError::Prompt(_) => "PromptError",
            RunError::Client(_) => "UnreachableError",
            RunError::Session(e) => match e {
                SessionError::ProxyAuth { .. } => "ProxyAuthError",
                SessionError::Credential { .. } => "CredentialError",
                SessionError::Unreachable(_) => "UnreachableError",
                SessionError::Query { .. } | SessionError::QueryTransport(_) | SessionError::QueryDecode(_) => {
                    "QueryError"
                }
                SessionError::InvalidState { .. } => "SessionStateError",
            },
            RunError::Schema(_) => "SchemaError",
            RunError::Output(_) => "OutputError",
        }
    }

    /// Distinct non-zero process status per fatal kind.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            "ConfigError" => 2,
            "ProxyAuthError" => 10,
            "CredentialError" => 11,
            "UnreachableError" => 12,
            "QueryError" => 13,
            "SchemaError" => 14,
            "OutputError" => 15,
            "PromptError" => 16,
            _ => 17,
        }
    }
}
