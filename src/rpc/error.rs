use thiserror::Error;

use crate::rpc::transport::TransportError;

/// Ways a call to the Transmission RPC interface can fail.
///
/// Callers usually branch on the category: a `ConnectionFailure` may be worth
/// retrying later, the response variants mean the server misbehaved or
/// rejected the request and retrying will not help.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The transport could not complete the exchange (refused, DNS, timeout).
    #[error("Could not connect to Transmission")]
    ConnectionFailure(#[source] TransportError),

    /// The response does not follow the protocol.
    #[error("Invalid response received from Transmission: {0}")]
    InvalidResponse(String),

    /// The server answered with a status other than 200 or a usable 409.
    #[error("Unexpected response received from Transmission: HTTP {status}")]
    UnexpectedResponse { status: u16 },

    /// The call was refused locally before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RpcError {
    /// HTTP status code, for `UnexpectedResponse`.
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::UnexpectedResponse { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether trying the same call again later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::ConnectionFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn test_rpc_error_display() {
        let unexpected = RpcError::UnexpectedResponse { status: 500 };
        assert_eq!(
            unexpected.to_string(),
            "Unexpected response received from Transmission: HTTP 500"
        );

        let invalid = RpcError::InvalidResponse("missing session id".to_string());
        assert_eq!(
            invalid.to_string(),
            "Invalid response received from Transmission: missing session id"
        );
    }

    #[test]
    fn test_connection_failure_keeps_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RpcError::ConnectionFailure(Box::new(cause));

        assert_eq!(err.to_string(), "Could not connect to Transmission");
        assert_eq!(err.source().map(|s| s.to_string()), Some("refused".to_string()));
        assert!(err.is_retryable());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_status_only_for_unexpected() {
        assert_eq!(RpcError::UnexpectedResponse { status: 404 }.status(), Some(404));
        assert!(!RpcError::UnexpectedResponse { status: 404 }.is_retryable());
        assert!(!RpcError::InvalidResponse(String::new()).is_retryable());
    }
}
