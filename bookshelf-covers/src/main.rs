//! # Bookshelf Covers
//!
//! Stand-in cover service used by the Bookshelf API during development and
//! in tests.

use std::time::Duration;

use anyhow::Context;
use bookshelf_covers::{CoverServiceConfig, router};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bookshelf-covers")]
#[command(about = "Serves random book covers with optional fault injection")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "COVERS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(short, long, env = "COVERS_PORT", default_value_t = 52644)]
    port: u16,

    /// Delay before a faulted request answers 500 (humantime, e.g. 500ms)
    #[arg(
        long,
        env = "COVERS_FAULT_DELAY",
        default_value = "500ms",
        value_parser = humantime::parse_duration
    )]
    fault_delay: Duration,

    /// Smallest payload in bytes
    #[arg(long, env = "COVERS_MIN_BYTES", default_value_t = 2 * 1024 * 1024)]
    min_bytes: usize,

    /// Payload size upper bound in bytes (exclusive)
    #[arg(long, env = "COVERS_MAX_BYTES", default_value_t = 10 * 1024 * 1024)]
    max_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoverServiceConfig {
        fault_delay: cli.fault_delay,
        min_bytes: cli.min_bytes,
        max_bytes: cli.max_bytes,
    };
    config.validate().context("invalid cover service settings")?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        fault_delay = ?config.fault_delay,
        min_bytes = config.min_bytes,
        max_bytes = config.max_bytes,
        "Starting cover service"
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("cover service terminated")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
