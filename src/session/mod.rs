/*!
Controller session lifecycle.

- `credentials`: `Credentials` and the `CredentialProvider` seam (static or prompting).
- `token`: bearer token and the token-endpoint answer.
- `manager`: `SessionManager`, which acquires a token, runs one authenticated query
  and revokes the token again.
*/

pub mod credentials;
pub mod manager;
pub mod token;

pub use credentials::{PromptError, PromptingCredentials};
pub use manager::{SessionError, SessionManager};
