//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, DATABASE_URL override)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to store, server and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize, load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::DatabaseConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::StoreBackend;
