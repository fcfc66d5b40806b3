use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;
use serde::Serialize;

use orderflow_core::DomainError;
use orderflow_fulfillment::{ErrorKind, FulfillmentError};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: &'static str,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, title: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title,
            message: message.into(),
            timestamp: Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub fn json_error(
    status: StatusCode,
    title: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (status, axum::Json(ErrorResponse::new(status, title, message))).into_response()
}

pub fn invalid_request(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "Invalid Request", message)
}

/// Internal details are logged, never returned.
pub fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "An unexpected error occurred",
    )
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => invalid_request(err.to_string()),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "Not Found", err.to_string()),
        DomainError::InvariantViolation(_) => {
            tracing::error!(error = %err, "invariant violated while handling request");
            internal_error()
        }
    }
}

pub fn fulfillment_error_to_response(err: FulfillmentError) -> axum::response::Response {
    match err.kind() {
        ErrorKind::NotFound => match err {
            FulfillmentError::OrderNotFound(_) => {
                json_error(StatusCode::NOT_FOUND, "Order Not Found", err.to_string())
            }
            _ => json_error(StatusCode::NOT_FOUND, "Not Found", err.to_string()),
        },
        ErrorKind::InvalidArgument => invalid_request(err.to_string()),
        ErrorKind::Internal => {
            tracing::error!(error = %err, "order processing failed");
            internal_error()
        }
    }
}
