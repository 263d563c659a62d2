//! Binary crate for the `weather-server` HTTP relay.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and resolving startup configuration
//! - Logging setup
//! - Routing `/weather` requests and mapping failures to status codes

use clap::Parser;
use weather_core::ConfigError;

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,weather_core=debug,weather_server=debug")
            }),
        )
        .init();

    tracing::info!("Starting up weather fetcher...");

    let cmd = cli::Cli::parse();
    let config = match cmd.config() {
        Ok(config) => config,
        Err(err) => {
            if let Some(ConfigError::MissingApiKey) = err.downcast_ref::<ConfigError>() {
                println!("{err}");
                std::process::exit(1);
            }
            return Err(err);
        }
    };

    cmd.run(config).await
}
