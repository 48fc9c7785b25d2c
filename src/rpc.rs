//! Client for the Transmission RPC interface.
//!
//! Transmission exposes its RPC API as JSON over HTTP POST. Every request
//! carries a session id header; a missing or stale id is answered with
//! `409 Conflict` and a fresh id, which the client stores before resending.
//!
//! # Protocol
//!
//! ```text
//! POST /transmission/rpc HTTP/1.1
//! X-Transmission-Session-Id: <token>
//! Content-Type: application/json
//!
//! {"method":"torrent-get","arguments":{"fields":["id"]},"tag":"1"}
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use transmission_rpc::rpc::RpcClient;
//!
//! let mut client = RpcClient::new();
//! let stats = client.call_method("session-stats").await?;
//! ```

mod client;
mod envelope;
mod error;
mod transport;

pub use client::RpcClient;
pub use envelope::CallEnvelope;
pub use error::RpcError;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
