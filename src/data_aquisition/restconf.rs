use async_trait::async_trait;
use reqwest::{Client, Proxy, StatusCode, header};
use tracing::debug;

use super::core::{ControllerRequest, ControllerTransport, RawResponse, TransportError};
use crate::config::ControllerConfig;

pub const TOKEN_PATH: &str = "/rest-gateway/rest/api/v1/auth/token";
pub const REVOCATION_PATH: &str = "/rest-gateway/rest/api/v1/auth/revocation";
pub const L2_TOPOLOGY_PATH: &str = "/restconf/data/ietf-network:networks/network=L2Topology";

/// HTTPS client for the controller's REST gateway and RESTCONF tree.
///
/// Certificate verification is disabled: controllers are commonly deployed with
/// self-signed certificates and the operator has chosen to trust the host given.
pub struct HttpTransport {
    client: Client,
    config: ControllerConfig,
}

impl HttpTransport {
    pub fn new(config: ControllerConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(config.timeout);
        builder = match &config.proxy {
            Some(proxy) => builder.proxy(
                Proxy::all(proxy.url().as_str())
                    .map_err(|e| TransportError::Other(format!("invalid proxy {proxy}: {e}")))?,
            ),
            None => builder.no_proxy(),
        };
        let client = builder
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            return TransportError::Timeout(self.config.timeout.as_secs());
        }
        match (&self.config.proxy, err.is_connect()) {
            (Some(proxy), true) => TransportError::Proxy {
                proxy: proxy.to_string(),
                message: err.to_string(),
            },
            (None, true) => TransportError::Connect(err.to_string()),
            _ => TransportError::Other(err.to_string()),
        }
    }
}

#[async_trait]
impl ControllerTransport for HttpTransport {
    async fn send(&self, request: ControllerRequest) -> Result<RawResponse, TransportError> {
        let label = request.label();
        let builder = match request {
            ControllerRequest::IssueToken { authorization } => self
                .client
                .post(self.config.url_for(TOKEN_PATH))
                .header(header::AUTHORIZATION, format!("Basic {authorization}"))
                .json(&serde_json::json!({ "grant_type": "client_credentials" })),
            ControllerRequest::FetchResource { bearer, path } => self
                .client
                .get(self.config.url_for(&path))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {bearer}")),
            ControllerRequest::RevokeToken { authorization, token } => self
                .client
                .post(self.config.url_for(REVOCATION_PATH))
                .header(header::AUTHORIZATION, format!("Basic {authorization}"))
                .form(&[("token", token.as_str()), ("token_type_hint", "token")]),
        };

        debug!(request = label, server = %self.config.server, "sending controller request");
        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if status == StatusCode::PROXY_AUTHENTICATION_REQUIRED {
            return Err(TransportError::Proxy {
                proxy: self
                    .config
                    .proxy
                    .as_ref()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "<none>".to_string()),
                message: "proxy authentication required (407)".to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(request = label, status = status.as_u16(), bytes = body.len(), "controller answered");
        Ok(RawResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ProxyEndpoint;

    #[test]
    fn test_build_direct_transport() {
        let config = ControllerConfig::new("127.0.0.1:8443", None, Duration::from_secs(2)).unwrap();
        assert!(HttpTransport::new(config).is_ok());
    }

    #[test]
    fn test_build_proxied_transport() {
        let proxy = ProxyEndpoint::parse("user:pw@127.0.0.1:3128").unwrap();
        let config = ControllerConfig::new("nsp.lab", Some(proxy), Duration::from_secs(2)).unwrap();
        assert!(HttpTransport::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_controller_is_connect_error() {
        // Port 9 on loopback is expected to refuse connections.
        let config = ControllerConfig::new("127.0.0.1:9", None, Duration::from_secs(2)).unwrap();
        let transport = HttpTransport::new(config).unwrap();
        let result = transport
            .send(ControllerRequest::IssueToken { authorization: "dTpw".to_string() })
            .await;
        assert!(matches!(
            result,
            Err(TransportError::Connect(_)) | Err(TransportError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_proxy_error() {
        let proxy = ProxyEndpoint::parse("127.0.0.1:9").unwrap();
        let config = ControllerConfig::new("nsp.invalid", Some(proxy), Duration::from_secs(2)).unwrap();
        let transport = HttpTransport::new(config).unwrap();
        let result = transport
            .send(ControllerRequest::IssueToken { authorization: "dTpw".to_string() })
            .await;
        assert!(matches!(
            result,
            Err(TransportError::Proxy { .. }) | Err(TransportError::Timeout(_))
        ));
    }
}
