//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured store
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when the store is ready)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::store::{MemoryStore, PgStore, Store, StoreError};

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the store selected by `config.store.backend`.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    let store: Arc<dyn Store> = match config.store.backend {
        StoreBackend::Postgres => Arc::new(PgStore::connect(&config.database).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; accounts are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

/// Bring the service up and block until a shutdown signal is handled.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = ?config.store.backend,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = open_store(&config).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
