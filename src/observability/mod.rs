//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint and server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID (`x-request-id`) is attached by the HTTP layer and shows up in
//!   the request span

pub mod logging;
pub mod metrics;
