//! Configuration Info Middleware.
//! Serves allow-listed config sections as JSON; everything else passes through.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::exposure::{ConfigInfoState, ExposureError};
use crate::observability::metrics;

pub async fn config_info_middleware(
    State(state): State<Arc<ConfigInfoState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // 1. Not ours: hand off untouched.
    if !state.handles(request.uri().path()) {
        return next.run(request).await;
    }

    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // 2. Method check, load, filter, narrow.
    let response = match state.resolve(&method, &path).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => {
            log_failure(&err, &method, &path);
            err.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}

fn log_failure(err: &ExposureError, method: &axum::http::Method, path: &str) {
    match err {
        ExposureError::ConfigUnavailable(detail) => {
            tracing::error!(method = %method, path = %path, detail = %detail, "Configuration unavailable");
        }
        ExposureError::MethodNotAllowed => {
            tracing::warn!(method = %method, path = %path, "Method not allowed on configuration endpoint");
        }
        ExposureError::MalformedPath | ExposureError::NotFound => {
            tracing::debug!(method = %method, path = %path, error = %err, "Configuration request rejected");
        }
    }
}
