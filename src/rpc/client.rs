//! RPC client for the Transmission web interface.
//!
//! This module provides `RpcClient`, which posts JSON envelopes to
//! `/transmission/rpc` and takes care of the session-id handshake the daemon
//! uses as CSRF protection.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::{EndpointConfig, SESSION_ID_HEADER};
use crate::rpc::envelope::CallEnvelope;
use crate::rpc::error::RpcError;
use crate::rpc::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// HTTP status the daemon answers with when the session id is missing or stale.
const STATUS_SESSION_REJECTED: u16 = 409;

/// Client for the Transmission RPC interface.
///
/// The client keeps the endpoint configuration, the current session token and
/// the HTTP transport. The token starts out empty and is learned from the
/// server: the first request is answered with `409 Conflict` plus a fresh
/// `X-Transmission-Session-Id`, after which the request is sent once more.
///
/// # Example
///
/// ```ignore
/// use transmission_rpc::RpcClient;
/// use serde_json::json;
///
/// let mut client = RpcClient::new();
/// let session = client.call_method("session-get").await?;
///
/// let args = json!({"fields": ["id", "name"]});
/// let torrents = client
///     .call("torrent-get", args.as_object().cloned().unwrap_or_default(), None)
///     .await?;
/// ```
pub struct RpcClient {
    config: EndpointConfig,
    token: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl Default for RpcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("config", &self.config)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Client for `localhost:9091` using the default HTTP transport.
    pub fn new() -> Self {
        Self::with_config(EndpointConfig::default())
    }

    pub fn with_config(config: EndpointConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::default()))
    }

    /// Build a client around a specific transport, e.g. a scripted fake in tests.
    pub fn with_transport(config: EndpointConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            token: None,
            transport,
        }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.host = host.into();
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.config.port = port;
    }

    /// The session token sent with every request, if one has been learned.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = transport;
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> String {
        self.config.url()
    }

    /// Call `method` without arguments or tag.
    pub async fn call_method(&mut self, method: &str) -> Result<Value, RpcError> {
        self.call(method, Map::new(), None).await
    }

    /// Call an RPC method and return the decoded response body.
    ///
    /// The response is returned as-is; checking its `result` field is left to
    /// the caller.
    ///
    /// If the server rejects the session token, the token it hands back is
    /// stored and the call is repeated once. A second rejection is not
    /// retried again.
    ///
    /// # Errors
    ///
    /// - `RpcError::ConnectionFailure` if the transport fails
    /// - `RpcError::InvalidResponse` on a 409 without a session id, or a body
    ///   that is not JSON
    /// - `RpcError::UnexpectedResponse` for any other status, or a repeated 409
    /// - `RpcError::InvalidRequest` if `method` is empty
    pub async fn call(
        &mut self,
        method: &str,
        arguments: Map<String, Value>,
        tag: Option<&str>,
    ) -> Result<Value, RpcError> {
        if method.is_empty() {
            return Err(RpcError::InvalidRequest("method name is empty".to_string()));
        }

        let body = CallEnvelope::new(method, &arguments, tag)
            .to_json()
            .map_err(|e| RpcError::InvalidRequest(format!("Failed to encode request: {}", e)))?;
        let url = self.url();

        let mut refreshed = false;
        loop {
            let response = self.send(&url, body.clone()).await?;

            match response.status {
                200 => return decode_body(&response.body),
                STATUS_SESSION_REJECTED => {
                    let token = session_token(&response)?;
                    self.token = Some(token.to_string());

                    if refreshed {
                        warn!("Session id for {} rejected again after refresh", method);
                        return Err(RpcError::UnexpectedResponse {
                            status: STATUS_SESSION_REJECTED,
                        });
                    }

                    info!("Received new session id, retrying {}", method);
                    refreshed = true;
                }
                status => {
                    warn!("Transmission answered {} with HTTP {}", method, status);
                    return Err(RpcError::UnexpectedResponse { status });
                }
            }
        }
    }

    async fn send(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, RpcError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push((SESSION_ID_HEADER.to_string(), token.clone()));
        }

        debug!("POST {} ({} bytes)", url, body.len());

        self.transport
            .post(HttpRequest {
                url: url.to_string(),
                headers,
                body,
            })
            .await
            .map_err(RpcError::ConnectionFailure)
    }
}

/// Pull the replacement session id out of a 409 response.
fn session_token(response: &HttpResponse) -> Result<&str, RpcError> {
    response
        .header(SESSION_ID_HEADER)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            RpcError::InvalidResponse(format!(
                "HTTP {} without {} header",
                STATUS_SESSION_REJECTED, SESSION_ID_HEADER
            ))
        })
}

fn decode_body(body: &[u8]) -> Result<Value, RpcError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RpcError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    // A bare `null` carries no response envelope at all.
    if value.is_null() {
        return Err(RpcError::InvalidResponse("Response body is null".to_string()));
    }

    Ok(value)
}
