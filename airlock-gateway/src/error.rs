//! Gateway error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by the gateway's HTTP handlers.
///
/// Each variant carries everything needed to shape the wire response:
/// auth failures map to 401, validation failures to 400, and collaborator
/// or body-parse failures to 500 with the failing route's default fields
/// filled in so callers can deserialize the body they expected.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The gate is enabled and the request carried no `Authorization` header.
    #[error("Authorization header required")]
    MissingAuthHeader,

    /// The presented token does not match the configured one.
    #[error("Invalid token")]
    InvalidToken,

    /// One or more required request fields were absent or empty.
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// The exec route could not parse its body or reach the platform.
    #[error("{0}")]
    Exec(String),

    /// The write route could not parse its body or reach the platform.
    #[error("{0}")]
    Write(String),

    /// The read route could not parse its query or reach the platform.
    #[error("{0}")]
    Read(String),

    /// The sandbox health probe could not run.
    #[error("{0}")]
    Probe(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            Self::MissingAuthHeader | Self::InvalidToken => {
                (StatusCode::UNAUTHORIZED, json!({ "error": message }))
            }
            Self::MissingFields(_) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::Exec(_) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message })),
            Self::Write(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "success": false }),
            ),
            Self::Read(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "content": "", "success": false }),
            ),
            Self::Probe(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "unhealthy", "error": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
