//! Static bearer-token gate for the sandbox routes.
//!
//! The gate sits in front of every route except the liveness pair. When no
//! token is configured it waves everything through, so local development
//! needs no credentials at all.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::GatewayError;
use crate::routes::AppState;

/// Middleware that enforces the configured bearer token, if any.
///
/// # Errors
///
/// [`GatewayError::MissingAuthHeader`] when the gate is enabled and the
/// request carries no `Authorization` header at all, and
/// [`GatewayError::InvalidToken`] when the header is present but its token
/// does not match. Both map to 401 on the wire.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let Some(expected) = state.config.auth_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let Some(header) = request.headers().get(AUTHORIZATION) else {
        tracing::debug!("rejecting request without Authorization header");
        return Err(GatewayError::MissingAuthHeader);
    };

    match header.to_str().ok().and_then(bearer_token) {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => {
            tracing::debug!("rejecting request with non-matching bearer token");
            Err(GatewayError::InvalidToken)
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; the token itself is compared
/// byte-for-byte by the caller. Returns `None` when the value does not
/// follow the bearer form.
#[must_use]
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, rest) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("Bearer")
        .then_some(rest.trim_start())
}
