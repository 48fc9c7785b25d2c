//! transmission-rpc - issue a single call against a Transmission daemon.
//!
//! Prints the decoded response as pretty JSON on stdout. Logs go to stderr
//! and are controlled by `RUST_LOG`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transmission_rpc::config::{DEFAULT_HOST, DEFAULT_PORT};
use transmission_rpc::{EndpointConfig, RpcClient};

#[derive(Parser, Debug)]
#[command(name = "transmission-rpc")]
#[command(about = "Call a method on the Transmission RPC interface", version)]
struct Args {
    /// Host running the Transmission daemon
    #[arg(long, env = "TRANSMISSION_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// RPC port
    #[arg(long, env = "TRANSMISSION_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Session id to send with the first request
    #[arg(long)]
    token: Option<String>,

    /// Correlation tag echoed back by the server
    #[arg(long)]
    tag: Option<String>,

    /// RPC method, e.g. session-get or torrent-get
    method: String,

    /// Method arguments as a JSON object
    arguments: Option<String>,
}

fn parse_arguments(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    let value: Value = serde_json::from_str(raw).context("Arguments are not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("Arguments must be a JSON object, got {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "transmission_rpc=info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let arguments = parse_arguments(args.arguments.as_deref())?;

    let mut client = RpcClient::with_config(EndpointConfig::new(args.host, args.port));
    if let Some(token) = args.token {
        client.set_token(token);
    }

    tracing::debug!("Calling {} on {}", args.method, client.url());

    let response = client
        .call(&args.method, arguments, args.tag.as_deref())
        .await
        .with_context(|| format!("{} failed", args.method))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
