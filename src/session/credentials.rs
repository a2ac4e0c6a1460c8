use std::{
    fmt::Debug,
    io::{self, BufRead, Write},
};

use base64::{Engine, prelude::BASE64_STANDARD};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read {field}: {source}")]
    Io {
        field: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Controller login, resolved once per run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// base64 of `username:password`, the value that follows `Basic ` in the header.
    pub fn basic_authorization(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password))
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies the credentials for a run.
pub trait CredentialProvider {
    fn credentials(&self) -> Result<Credentials, PromptError>;
}

/// Credentials that are already known.
#[cfg(test)]
pub struct StaticCredentials(pub Credentials);

#[cfg(test)]
impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, PromptError> {
        Ok(self.0.clone())
    }
}

/// Uses whatever was given on the command line and asks the terminal for the rest.
/// The password prompt does not echo.
pub struct PromptingCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl PromptingCredentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    fn prompt_username() -> Result<String, PromptError> {
        let io_err = |source| PromptError::Io { field: "username", source };
        let mut stdout = io::stdout();
        write!(stdout, "Enter your username: ").map_err(io_err)?;
        stdout.flush().map_err(io_err)?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map_err(io_err)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_password() -> Result<String, PromptError> {
        rpassword::prompt_password("Enter your password: ")
            .map_err(|source| PromptError::Io { field: "password", source })
    }
}

impl CredentialProvider for PromptingCredentials {
    fn credentials(&self) -> Result<Credentials, PromptError> {
        let username = match &self.username {
            Some(username) => username.clone(),
            None => Self::prompt_username()?,
        };
        if username.is_empty() {
            return Err(PromptError::Empty("username"));
        }
        let password = match &self.password {
            Some(password) => password.clone(),
            None => Self::prompt_password()?,
        };
        Ok(Credentials::new(username, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization() {
        let creds = Credentials::new("admin", "NokiaNsp1!");
        assert_eq!(creds.basic_authorization(), "YWRtaW46Tm9raWFOc3AxIQ==");
        assert_eq!(Credentials::new("u", "p").basic_authorization(), "dTpw");
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("admin", "hunter2");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_prompting_uses_given_values_without_prompting() {
        let provider = PromptingCredentials::new(Some("admin".into()), Some("pw".into()));
        assert_eq!(provider.credentials().unwrap(), Credentials::new("admin", "pw"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials(Credentials::new("admin", "pw"));
        assert_eq!(provider.credentials().unwrap().username(), "admin");
    }

    #[test]
    fn test_empty_username_rejected() {
        let provider = PromptingCredentials::new(Some(String::new()), Some("pw".into()));
        assert!(matches!(provider.credentials(), Err(PromptError::Empty("username"))));
    }
}
