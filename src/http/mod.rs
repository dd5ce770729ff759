//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → request.rs (request ID header)
//!     → middleware/config_info.rs (endpoint or pass-through)
//!     → wrapped application Router
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{default_app, HttpServer};
