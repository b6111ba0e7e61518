//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bank_service::config::{AppConfig, StoreBackend};
use bank_service::{HttpServer, MemoryStore, Shutdown};
use tokio::net::TcpListener;

/// A running service bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    /// Spawn the service over a fresh in-memory store.
    pub async fn start() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.listener.bind_address = "127.0.0.1:0".to_string();

        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config, Arc::new(MemoryStore::new()));
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
