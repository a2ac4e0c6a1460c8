/*!
Topology provider interface.

This module defines `TopologySource`, an async trait that returns the raw IETF L2
document. The controller-backed implementation hides the whole session lifecycle
(token, query, revocation) behind a single call.
*/

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    data_aquisition::{core::ControllerTransport, restconf::L2_TOPOLOGY_PATH},
    session::{SessionError, SessionManager},
};

#[async_trait]
pub trait TopologySource: Send {
    async fn fetch_document(&mut self) -> Result<Value, SessionError>;
}

#[async_trait]
impl<T: ControllerTransport> TopologySource for SessionManager<T> {
    async fn fetch_document(&mut self) -> Result<Value, SessionError> {
        self.run_authenticated(L2_TOPOLOGY_PATH).await
    }
}
