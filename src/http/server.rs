//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the host application's Router with the configuration endpoint
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::exposure::{ConfigInfoState, SetupError};
use crate::http::middleware::config_info_middleware;
use crate::http::X_REQUEST_ID;

/// HTTP server hosting an application behind the configuration endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that serves `inner` with the configuration endpoint in front.
    pub fn new(config: ServerConfig, inner: Router) -> Result<Self, SetupError> {
        let state = Arc::new(ConfigInfoState::new(&config.config_info)?);

        tracing::info!(
            endpoint = %state.endpoint_path(),
            sections = state.allow_list().iter().count(),
            config_file = ?config.config_info.config_file,
            "Configuration endpoint enabled"
        );

        let router = Self::build_router(&config, inner, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, inner: Router, state: Arc<ConfigInfoState>) -> Router {
        inner
            .layer(middleware::from_fn_with_state(state, config_info_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Stand-in application used when the binary runs without a host app.
pub fn default_app() -> Router {
    Router::new().fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
