//! User registry server
//!
//! Serves create, read, update and delete operations on in-memory user
//! records over HTTP.

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use user_registry_server::{AppState, ServerConfig, create_app, init_tracing};
use user_store::MemoryUserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting user registry server"
    );

    // The store lives for the lifetime of the process
    let store = MemoryUserStore::new();
    let state = AppState::new(config.clone(), store);
    let app = create_app(state);

    // Bind and serve
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves once the process is asked to stop (Ctrl+C, or SIGTERM on unix).
/// If a handler cannot be installed, that source is ignored and the other
/// one still triggers the shutdown.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let source = tokio::select! {
        _ = interrupt => "interrupt",
        _ = terminate => "terminate",
    };
    info!(signal = source, "Shutting down");
}
