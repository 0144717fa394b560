//! bondtrack-ck (Check-In Verification) - Main entry point
//!
//! HTTP microservice for the BondTrack check-in flow: clients confirm
//! location and identity, and every completed verification is appended to
//! the compliance audit log.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use bondtrack_ck::directory::ClientDirectory;
use bondtrack_ck::store::CheckInLog;
use bondtrack_ck::verify::AlwaysMatch;
use bondtrack_ck::{build_router, AppState, CkConfig};

/// Command-line arguments for bondtrack-ck
#[derive(Parser, Debug)]
#[command(name = "bondtrack-ck")]
#[command(about = "Check-In Verification microservice for BondTrack")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "BONDTRACK_CK_PORT")]
    port: u16,

    /// Data folder holding the optional clients.toml seed file
    #[arg(short, long, env = "BONDTRACK_DATA")]
    data_folder: Option<PathBuf>,

    /// Verification pacing delay in milliseconds
    #[arg(long, default_value = "1500", env = "BONDTRACK_VERIFY_PACING_MS")]
    verify_pacing_ms: u64,

    /// Bounded wait for a location fix in seconds
    #[arg(long, default_value = "10", env = "BONDTRACK_LOCATION_WAIT_SECS")]
    location_wait_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting BondTrack Check-In (bondtrack-ck) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = CkConfig {
        verify_pacing_ms: args.verify_pacing_ms,
        location_wait_secs: args.location_wait_secs,
    };
    info!(
        verify_pacing_ms = config.verify_pacing_ms,
        location_wait_secs = config.location_wait_secs,
        "Flow configuration loaded"
    );

    // Seed the client directory from clients.toml if present, else demo data
    let data_folder = bondtrack_common::config::resolve_data_folder(
        args.data_folder.as_deref().and_then(|p| p.to_str()),
        "BONDTRACK_DATA",
    )?;
    let seed_path = data_folder.join("clients.toml");
    let clients = if seed_path.exists() {
        let clients = ClientDirectory::load_seed_file(&seed_path)
            .with_context(|| format!("Failed to load seed file {}", seed_path.display()))?;
        info!("Loaded {} clients from {}", clients.len(), seed_path.display());
        clients
    } else {
        let clients = ClientDirectory::demo_seed();
        info!("No seed file at {}; using {} demo clients", seed_path.display(), clients.len());
        clients
    };
    let directory = Arc::new(ClientDirectory::with_clients(clients));

    // Create application state and router
    let state = AppState::new(
        directory,
        Arc::new(CheckInLog::new()),
        Arc::new(AlwaysMatch::new(config.verify_pacing())),
        config,
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("bondtrack-ck listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
