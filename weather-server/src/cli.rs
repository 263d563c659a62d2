use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use weather_core::{Config, ConfigFile, OpenWeatherProvider};

use crate::server::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Coordinates in, weather summary out")]
pub struct Cli {
    /// Optional TOML file with `http_port` and `[providers.openweather] api_key`.
    /// Environment variables take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen port; overrides OW_HTTP_PORT.
    #[arg(long)]
    pub port: Option<String>,
}

impl Cli {
    /// Resolve the startup configuration from flags, environment and file.
    pub fn config(&self) -> anyhow::Result<Config> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        Ok(Config::resolve(
            |name| std::env::var(name).ok(),
            &file,
            self.port.clone(),
        )?)
    }

    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        let state = AppState::new(Arc::new(OpenWeatherProvider::from_config(&config)));

        let addr = config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;

        info!(%addr, "Listening for weather requests");

        axum::serve(listener, server::router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("Shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
