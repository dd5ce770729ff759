//! Request identification.
//!
//! # Responsibilities
//! - Name the header carrying the per-request ID
//! - IDs are generated (UUID v4) by tower-http when the client sends none
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The same ID is echoed back on the response

use axum::http::HeaderName;

/// Header carrying the request ID on requests and responses.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
