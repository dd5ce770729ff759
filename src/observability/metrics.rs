//! Metrics collection and exposition.
//!
//! # Metrics
//! - `configinfo_requests_total` (counter): endpoint requests by method, status
//!   (method is `GET` or `other`, so client-chosen methods cannot add series)
//! - `configinfo_request_duration_seconds` (histogram): endpoint latency
//!
//! # Design Decisions
//! - Only requests handled by the endpoint are recorded; pass-through traffic
//!   belongs to the wrapped application
//! - Without an installed recorder the macros are no-ops

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one request served by the configuration endpoint.
pub fn record_request(method: &Method, status: u16, start: Instant) {
    let labels = [("method", method_label(method)), ("status", status_label(status))];
    metrics::counter!("configinfo_requests_total", &labels).increment(1);
    metrics::histogram!("configinfo_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

fn method_label(method: &Method) -> &'static str {
    if *method == Method::GET {
        "GET"
    } else {
        "other"
    }
}

fn status_label(status: u16) -> &'static str {
    match status {
        200 => "200",
        400 => "400",
        404 => "404",
        405 => "405",
        500 => "500",
        _ => "other",
    }
}
