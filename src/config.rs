//! Endpoint configuration for the Transmission RPC interface.

use serde::{Deserialize, Serialize};

/// Path of the RPC endpoint on the Transmission web server.
pub const RPC_PATH: &str = "/transmission/rpc";

/// Header carrying the session token in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// Default host when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Transmission RPC port.
pub const DEFAULT_PORT: u16 = 9091;

/// Where the RPC server lives.
///
/// Only host and port are configurable; the path is always [`RPC_PATH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Full URL of the RPC endpoint, e.g. `http://localhost:9091/transmission/rpc`.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, RPC_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_endpoint() {
        let config = EndpointConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9091);
        assert_eq!(config.url(), "http://localhost:9091/transmission/rpc");
    }

    #[test]
    fn test_custom_endpoint_url() {
        let config = EndpointConfig::new("10.0.0.5", 8080);
        assert_eq!(config.url(), "http://10.0.0.5:8080/transmission/rpc");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EndpointConfig = serde_json::from_str(r#"{"host": "nas.local"}"#).unwrap();
        assert_eq!(config, EndpointConfig::new("nas.local", 9091));
    }
}
