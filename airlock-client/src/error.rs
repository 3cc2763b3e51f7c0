//! Error types for the client crate.

/// Errors returned by [`crate::SandboxClient`] operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport-level failure: connection refused, TLS, timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured gateway base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// No base URL was supplied and `AIRLOCK_BASE_URL` is unset.
    #[error("no gateway base URL configured")]
    MissingBaseUrl,

    /// The gateway answered with a non-success status.
    ///
    /// `message` carries the gateway's `error` field when the body had one,
    /// otherwise the raw body text.
    #[error("gateway error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The gateway is up but the sandbox could not run the probe command.
    #[error("sandbox probe failed: {0}")]
    ProbeFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_message() {
        let err = ClientError::Api {
            status: 401,
            message: "Invalid token".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"), "Display must include the status");
        assert!(msg.contains("Invalid token"), "Display must include the message");
    }

    #[test]
    fn missing_base_url_display_names_the_problem() {
        let msg = ClientError::MissingBaseUrl.to_string();
        assert!(msg.contains("base URL"), "got: {msg}");
    }
}
