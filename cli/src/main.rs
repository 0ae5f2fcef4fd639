//! Operator command line for the fact-check backend.
//!
//! Every subcommand maps to one `wire` endpoint, is sent with `reqwest`, and
//! prints the JSON answer pretty-printed on stdout. Logs go to stderr.

mod commands;
mod http;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] wire::ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid filter `{0}`; expected key=value")]
    InvalidFilter(String),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let endpoint = commands::endpoint_for(&cli.command)?;
    let client = reqwest::Client::new();
    let value = http::send(&client, &cli.base_url, &endpoint).await?;
    print_json(&value)
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
