//! Error types for the sandbox crate.

/// Errors a sandbox operation can fail with.
///
/// The gateway forwards the `Display` form of these verbatim in its 500
/// responses, so messages are written for API consumers, not for logs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SandboxError {
    /// The command process could not be launched at all.
    #[error("failed to launch command: {0}")]
    Launch(String),

    /// A file operation inside the sandbox failed.
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by the managing platform itself, e.g. a sandbox
    /// that cannot be provisioned for the given id.
    #[error("sandbox platform error: {0}")]
    Platform(String),
}
