//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and store produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, human or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through the trace span of every request
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
