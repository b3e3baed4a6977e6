//! Greeter service.
//!
//! Serves a configurable greeting on `/` and, unless started with `--plain`,
//! a Prometheus counter of greetings on `/metrics`.
//!
//! ```text
//!     Client ──▶ listener ──▶ Router ──┬──▶ GET /        greet (counter++)
//!                                      ├──▶ GET /metrics render counter
//!                                      └──▶ *            404
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use greeter::config::{load_config, validate_config, ConfigError};
use greeter::lifecycle::{wait_for_shutdown, Shutdown};
use greeter::observability::init_logging;
use greeter::HttpServer;

#[derive(Parser)]
#[command(name = "greeter")]
#[command(about = "Minimal greeting service with a Prometheus request counter", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "GREETER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Serve the greeting only, without the request counter.
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref());
    init_logging(
        loaded
            .as_ref()
            .map(|c| c.observability.log_level.as_str())
            .unwrap_or("info"),
    );

    let mut config = loaded.inspect_err(|e| {
        tracing::error!(path = ?cli.config, error = %e, "Failed to load configuration");
    })?;

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.plain {
        config.observability.metrics_enabled = false;
    }
    let config = config.apply_env();

    validate_config(&config)
        .map_err(ConfigError::Validation)
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    tracing::info!("greeter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        metrics_enabled = config.observability.metrics_enabled,
        greeting_from_env = config.greeting.from_env,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .inspect_err(|e| {
            tracing::error!(address = %config.listener.bind_address, error = %e, "Failed to bind");
        })?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
