//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, trace span)
//!     → accounts handlers (decode, validate, store call)
//!     → response.rs (envelope or ApiError → status + JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
