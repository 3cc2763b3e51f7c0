//! JSON shapes of the gateway's HTTP surface.
//!
//! Shared by the gateway (response construction) and the client SDK
//! (response parsing) so the two sides cannot drift apart. Field names
//! follow the wire contract, which spells the exit code `exitCode`.

use serde::{Deserialize, Serialize};

/// Result of one command execution inside a sandbox.
///
/// This is both what the platform hands back for `exec` and the response
/// body of `POST /sandbox/exec`, unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecOutcome {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit code; `-1` when the process died without one.
    pub exit_code: i32,
    /// Whether the command exited zero.
    pub success: bool,
}

/// Response body of `POST /sandbox/write`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteAck {
    /// Always `true` on a 2xx response.
    pub success: bool,
}

/// Response body of `GET /sandbox/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    /// Full contents of the requested file.
    pub content: String,
    /// Always `true` on a 2xx response.
    pub success: bool,
}

/// Response body of `GET /sandbox/health` when the probe succeeds.
///
/// A failed probe answers 500 with `{"status":"unhealthy","error":...}`
/// instead, so this shape only ever carries `status: "healthy"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// `"healthy"`.
    pub status: String,
    /// Trimmed stdout of `python3 --version` inside the probed sandbox.
    pub python: String,
    /// Exit code of the probe command.
    pub exit_code: i32,
}

/// Response body of the unauthenticated liveness routes `GET /` and
/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// `"ok"`.
    pub status: String,
    /// Name of the serving binary.
    pub service: String,
    /// RFC 3339 timestamp taken when the response was built.
    pub timestamp: String,
}

/// Minimal error envelope every non-2xx response carries.
///
/// Routes add their own default fields (`success`, `content`, `status`)
/// next to `error`; this type only binds the one field all of them share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}
