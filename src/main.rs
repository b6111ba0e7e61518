//! Bank account service.
//!
//! ```text
//!     Client Request          ┌───────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http server ──▶ accounts handlers       │
//!                             │   (request id,     decode → validate       │
//!                             │    trace, timeout)        │                │
//!                             │                           ▼                │
//!     Client Response         │   response.rs  ◀── store (postgres|memory) │
//!     ◀───────────────────────┼── status + JSON                            │
//!                             └───────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use bank_service::config::{self, AppConfig};
use bank_service::lifecycle::startup;
use bank_service::observability::logging;

#[derive(Parser)]
#[command(name = "bank-service")]
#[command(about = "HTTP CRUD service for bank accounts", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "BANK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::finalize(AppConfig::default())?,
    };

    logging::init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bank-service starting");

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
