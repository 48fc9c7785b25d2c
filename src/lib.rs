//! Transmission RPC client library.
//!
//! - `rpc` - the client, its HTTP transport seam and error types
//! - `config` - endpoint configuration and protocol constants
//!
//! ```ignore
//! use transmission_rpc::{EndpointConfig, RpcClient};
//!
//! let mut client = RpcClient::with_config(EndpointConfig::new("seedbox", 9091));
//! let session = client.call_method("session-get").await?;
//! ```

pub mod config;
pub mod rpc;

pub use config::EndpointConfig;
pub use rpc::{RpcClient, RpcError};
