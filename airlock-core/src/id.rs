use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-chosen identifier for a sandbox.
///
/// The gateway treats this as fully opaque: it is never parsed or
/// format-checked, only forwarded to the platform, which keys container
/// and filesystem affinity on it. Two requests carrying the same id reach
/// the same sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SandboxId(pub String);

impl SandboxId {
    /// Creates a `SandboxId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh `sandbox-<uuid>` id for callers that do not care
    /// which sandbox they get, as long as it is theirs.
    #[must_use]
    pub fn random() -> Self {
        Self(format!("sandbox-{}", Uuid::new_v4()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SandboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SandboxId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SandboxId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
