//! Failure taxonomy for the configuration endpoint.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned for every load failure. Never carries file-system detail.
pub const CONFIG_UNAVAILABLE_BODY: &str = "An error occurred";

/// Body returned when the requested section or option is not exposed.
pub const NOT_FOUND_BODY: &str = "Requested values aren't available";

/// Every way a request to the endpoint can fail.
///
/// A request outside the endpoint is not an error; it is handed to the
/// wrapped handler before any of these can arise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExposureError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("malformed path")]
    MalformedPath,

    #[error("requested values aren't available")]
    NotFound,
}

impl ExposureError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExposureError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ExposureError::ConfigUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExposureError::MalformedPath => StatusCode::BAD_REQUEST,
            ExposureError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ExposureError {
    fn into_response(self) -> Response {
        let status = self.status();
        let plain = [(header::CONTENT_TYPE, "text/plain; charset=utf-8")];
        match self {
            ExposureError::MethodNotAllowed => (
                status,
                [(header::ALLOW, "GET")],
                plain,
                "Method Not Allowed",
            )
                .into_response(),
            ExposureError::ConfigUnavailable(_) => (status, plain, CONFIG_UNAVAILABLE_BODY).into_response(),
            ExposureError::MalformedPath => (status, plain, "Bad Request").into_response(),
            ExposureError::NotFound => (status, plain, NOT_FOUND_BODY).into_response(),
        }
    }
}
