//! choreod — the choreo proxy daemon.
//!
//! Serves the branch, resource, discovery, runner, choreo and snapshot gRPC
//! services on one listener and routes every call to the backend of the
//! tenant it names.
//!
//! # Usage
//!
//! ```text
//! choreod serve --config /etc/choreo/choreod.toml
//! choreod check-config --config /etc/choreo/choreod.toml
//! ```

mod config;
mod registry;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use choreo_proxy::{ProxyState, TenantStore, build_router};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::{LogFormat, ProxyConfig};

#[derive(Parser)]
#[command(name = "choreod", about = "Choreo multi-tenant gRPC proxy")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the proxy.
    Serve {
        /// Path to choreod.toml.
        #[arg(long)]
        config: PathBuf,

        /// Override the configured listen address.
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Validate a config file and exit.
    CheckConfig {
        #[arg(long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config: path, listen } => {
            let mut config = ProxyConfig::from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            if let Some(listen) = listen {
                config.listen = listen;
            }
            init_tracing(config.log_format);
            serve(config).await
        }
        Command::CheckConfig { config: path } => {
            let config = ProxyConfig::from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            println!(
                "{}: ok ({} tenants, listen {})",
                path.display(),
                config.tenants.len(),
                config.listen
            );
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,choreod=debug,choreo=debug"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}

async fn serve(config: ProxyConfig) -> anyhow::Result<()> {
    info!(listen = %config.listen, tenants = config.tenants.len(), "choreo proxy starting");

    // ── Tenants ────────────────────────────────────────────────

    let store = TenantStore::new();
    let registered = registry::register_tenants(&config, &store)?;

    // ── Shutdown signal ────────────────────────────────────────

    let shutdown = CancellationToken::new();
    let probes = registry::spawn_probes(&store, registered, config.readiness_interval(), &shutdown);
    info!(interval = ?config.readiness_interval(), "readiness probes started");

    // ── gRPC server ────────────────────────────────────────────

    let state = ProxyState::new(store, config.relay_config(), shutdown.clone());
    let mut server = Server::builder();
    let router = build_router(&mut server, state);

    info!(addr = %config.listen, "gRPC server starting");

    let signal = shutdown.clone();
    router
        .serve_with_shutdown(config.listen, async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutdown signal received"),
                Err(e) => warn!(error = %e, "failed to listen for ctrl-c, shutting down"),
            }
            signal.cancel();
        })
        .await
        .context("gRPC server failed")?;

    // The server may also stop on its own; make sure background tasks end.
    shutdown.cancel();
    for probe in probes {
        let _ = probe.await;
    }

    info!("choreo proxy stopped");
    Ok(())
}
