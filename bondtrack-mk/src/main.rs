//! bondtrack-mk (Marketing & Drafting) - Main entry point
//!
//! HTTP microservice wrapping the hosted language model for the BondTrack
//! back office: document drafting, chat, translation, and marketing
//! campaign composition.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use bondtrack_mk::{build_router, AppState, LlmGateway};

/// Command-line arguments for bondtrack-mk
#[derive(Parser, Debug)]
#[command(name = "bondtrack-mk")]
#[command(about = "Marketing & Drafting microservice for BondTrack")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5781", env = "BONDTRACK_MK_PORT")]
    port: u16,

    /// API key for the hosted language model
    #[arg(long, env = "BONDTRACK_LLM_API_KEY")]
    api_key: Option<String>,
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
        "Starting BondTrack Marketing (bondtrack-mk) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let api_key = match args.api_key {
        Some(key) => key,
        None => {
            // Calls will fail with InvalidCredential until a key is set;
            // the service still starts so health checks pass.
            warn!("No language model API key configured (set BONDTRACK_LLM_API_KEY)");
            String::new()
        }
    };

    let gateway = LlmGateway::new(api_key).context("Failed to create language model gateway")?;
    let state = AppState::new(Arc::new(gateway));
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("bondtrack-mk listening on http://{}", addr);
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
