//! Sandbox capability traits.
//!
//! The gateway never names a concrete platform. It holds a
//! [`SandboxProvider`] and asks it for a per-id [`Sandbox`] handle on every
//! request; container provisioning, cold starts and per-id serialization
//! all happen behind these two traits.

use async_trait::async_trait;

use airlock_core::{ExecOutcome, SandboxId};

use crate::SandboxError;

/// A live handle to one sandbox.
///
/// Handles are cheap, per-request objects; dropping one does not affect
/// the sandbox, whose lifetime is managed entirely by the platform.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Run a shell command inside the sandbox and capture its output.
    ///
    /// A non-zero exit is not an error: it comes back as an
    /// [`ExecOutcome`] with `success == false`.
    ///
    /// # Errors
    /// Returns [`SandboxError::Launch`] if the command cannot be started
    /// at all, or [`SandboxError::Platform`] for platform-side failures.
    async fn exec(&self, command: &str) -> Result<ExecOutcome, SandboxError>;

    /// Create or overwrite a file inside the sandbox.
    ///
    /// # Errors
    /// Returns [`SandboxError::File`] if the path cannot be written.
    async fn write_file(&self, path: &str, content: &str) -> Result<(), SandboxError>;

    /// Read a file from the sandbox as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`SandboxError::File`] if the path does not exist or is not
    /// readable text.
    async fn read_file(&self, path: &str) -> Result<String, SandboxError>;
}

/// Hands out sandbox handles keyed by opaque id.
///
/// A provider instance is a binding to one platform namespace; asking it
/// twice for the same id must reach the same underlying sandbox state.
/// The id is never format-checked here or anywhere downstream.
#[async_trait]
pub trait SandboxProvider: Send + Sync {
    /// Obtain a handle for `id`, creating the sandbox if the platform has
    /// not seen the id before.
    ///
    /// # Errors
    /// Returns [`SandboxError::Platform`] (or [`SandboxError::File`] for
    /// filesystem-backed providers) if the sandbox cannot be made ready.
    async fn handle(&self, id: &SandboxId) -> Result<Box<dyn Sandbox>, SandboxError>;
}
