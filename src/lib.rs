//! Read-only JSON view of allow-listed INI configuration sections.

pub mod config;
pub mod exposure;
pub mod http;
pub mod ini;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use exposure::ConfigInfoState;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
