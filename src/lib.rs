//! Bank account CRUD service library.

pub mod accounts;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod validation;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Account, MemoryStore, PgStore, Store, StoreError};
