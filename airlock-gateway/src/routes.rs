//! Axum route handlers for the Airlock gateway API.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{any, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use airlock_core::{ProbeReport, ReadResponse, SandboxId, ServiceInfo, WriteAck};
use airlock_sandbox::SandboxProvider;

use crate::{auth, config::GatewayConfig, error::GatewayError};

// ── Shared state ─────────────────────────────────────────────────────────────

/// State shared by every handler: the sandbox platform and the gateway
/// configuration.
#[derive(Clone)]
pub struct AppState {
    /// Platform the sandbox routes forward to.
    pub sandboxes: Arc<dyn SandboxProvider>,
    /// Configuration, read-only after startup.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Bundle a provider and configuration into shared state.
    #[must_use]
    pub fn new(sandboxes: Arc<dyn SandboxProvider>, config: GatewayConfig) -> Self {
        Self {
            sandboxes,
            config: Arc::new(config),
        }
    }
}

/// Sandbox the health probe runs in when the caller does not name one.
const PROBE_SANDBOX_ID: &str = "health-check";

/// Command the health probe runs to prove end-to-end execution.
const PROBE_COMMAND: &str = "python3 --version";

/// The documented surface, advertised by the 404 fallback.
const ENDPOINTS: [&str; 5] = [
    "GET /health",
    "POST /sandbox/exec",
    "POST /sandbox/write",
    "GET /sandbox/read",
    "GET /sandbox/health",
];

// ── Request / response types ──────────────────────────────────────────────────

/// Body for `POST /sandbox/exec`.
///
/// Every field is optional at the serde level so the handler can report all
/// missing fields in one 400 instead of letting the extractor reject on the
/// first.
#[derive(Debug, Deserialize)]
pub struct ExecBody {
    pub sandbox_id: Option<String>,
    pub command: Option<String>,
}

/// Body for `POST /sandbox/write`.
#[derive(Debug, Deserialize)]
pub struct WriteBody {
    pub sandbox_id: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
}

/// Query parameters for `GET /sandbox/read`.
#[derive(Debug, Deserialize)]
pub struct ReadParams {
    pub sandbox_id: Option<String>,
    pub path: Option<String>,
}

/// Query parameters for `GET /sandbox/health`.
#[derive(Debug, Deserialize)]
pub struct ProbeParams {
    pub sandbox_id: Option<String>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given state.
///
/// The bearer gate wraps the four sandbox routes and the 404 fallback; the
/// liveness pair is registered after the gate layer and stays open. Each
/// sandbox route carries its own method fallback so a wrong-method request
/// lands on the documented 404 instead of a bare 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sandbox/exec", post(exec_command).fallback(not_found))
        .route("/sandbox/write", post(write_file).fallback(not_found))
        .route("/sandbox/read", get(read_file).fallback(not_found))
        .route("/sandbox/health", get(sandbox_health).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
        .route("/", any(health))
        .route("/health", any(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` and `GET /health` — service liveness probe.
///
/// Answers any method on these two paths, never requires credentials, and
/// never touches the sandbox platform.
pub async fn health() -> impl IntoResponse {
    Json(ServiceInfo {
        status: "ok".to_owned(),
        service: env!("CARGO_PKG_NAME").to_owned(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `POST /sandbox/exec` — run a shell command in the caller's sandbox.
///
/// # Errors
/// Returns [`GatewayError::MissingFields`] when `sandbox_id` or `command` is
/// absent or empty, and [`GatewayError::Exec`] when the body is not JSON or
/// the platform fails.
pub async fn exec_command(
    State(state): State<AppState>,
    body: Result<Json<ExecBody>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(body) = body.map_err(|e| GatewayError::Exec(e.to_string()))?;

    let mut missing = Vec::new();
    let sandbox_id = require_field(body.sandbox_id, "sandbox_id", &mut missing);
    let command = require_field(body.command, "command", &mut missing);
    if !missing.is_empty() {
        return Err(GatewayError::MissingFields(missing.join(", ")));
    }

    let id = SandboxId::new(sandbox_id);
    let sandbox = state
        .sandboxes
        .handle(&id)
        .await
        .map_err(|e| GatewayError::Exec(e.to_string()))?;
    let outcome = sandbox
        .exec(&command)
        .await
        .map_err(|e| GatewayError::Exec(e.to_string()))?;
    Ok(Json(outcome))
}

/// `POST /sandbox/write` — write a file into the caller's sandbox.
///
/// An empty `content` string is a legal file body; only an absent `content`
/// field is rejected.
///
/// # Errors
/// Returns [`GatewayError::MissingFields`] when `sandbox_id` or `path` is
/// absent or empty or `content` is absent, and [`GatewayError::Write`] when
/// the body is not JSON or the platform fails.
pub async fn write_file(
    State(state): State<AppState>,
    body: Result<Json<WriteBody>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(body) = body.map_err(|e| GatewayError::Write(e.to_string()))?;

    let mut missing = Vec::new();
    let sandbox_id = require_field(body.sandbox_id, "sandbox_id", &mut missing);
    let path = require_field(body.path, "path", &mut missing);
    let content = require_present(body.content, "content", &mut missing);
    if !missing.is_empty() {
        return Err(GatewayError::MissingFields(missing.join(", ")));
    }

    let id = SandboxId::new(sandbox_id);
    let sandbox = state
        .sandboxes
        .handle(&id)
        .await
        .map_err(|e| GatewayError::Write(e.to_string()))?;
    sandbox
        .write_file(&path, &content)
        .await
        .map_err(|e| GatewayError::Write(e.to_string()))?;
    Ok(Json(WriteAck { success: true }))
}

/// `GET /sandbox/read` — read a file from the caller's sandbox.
///
/// # Errors
/// Returns [`GatewayError::MissingFields`] when `sandbox_id` or `path` is
/// absent or empty, and [`GatewayError::Read`] when the platform fails.
pub async fn read_file(
    State(state): State<AppState>,
    params: Result<Query<ReadParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::Read(e.to_string()))?;

    let mut missing = Vec::new();
    let sandbox_id = require_field(params.sandbox_id, "sandbox_id", &mut missing);
    let path = require_field(params.path, "path", &mut missing);
    if !missing.is_empty() {
        return Err(GatewayError::MissingFields(missing.join(", ")));
    }

    let id = SandboxId::new(sandbox_id);
    let sandbox = state
        .sandboxes
        .handle(&id)
        .await
        .map_err(|e| GatewayError::Read(e.to_string()))?;
    let content = sandbox
        .read_file(&path)
        .await
        .map_err(|e| GatewayError::Read(e.to_string()))?;
    Ok(Json(ReadResponse {
        content,
        success: true,
    }))
}

/// `GET /sandbox/health` — end-to-end probe through a real sandbox.
///
/// Runs `python3 --version` in the probe sandbox, or in the caller's own
/// sandbox when `sandbox_id` is supplied. The report carries the probe's
/// exit code verbatim; only a platform failure makes the route unhealthy.
///
/// # Errors
/// Returns [`GatewayError::Probe`] when the platform cannot provide a
/// sandbox or the probe command cannot run.
pub async fn sandbox_health(
    State(state): State<AppState>,
    params: Result<Query<ProbeParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::Probe(e.to_string()))?;

    let id = match params.sandbox_id {
        Some(s) if !s.is_empty() => SandboxId::new(s),
        _ => SandboxId::new(PROBE_SANDBOX_ID),
    };

    let sandbox = state
        .sandboxes
        .handle(&id)
        .await
        .map_err(|e| GatewayError::Probe(e.to_string()))?;
    let outcome = sandbox
        .exec(PROBE_COMMAND)
        .await
        .map_err(|e| GatewayError::Probe(e.to_string()))?;
    Ok(Json(ProbeReport {
        status: "healthy".to_owned(),
        python: outcome.stdout.trim().to_owned(),
        exit_code: outcome.exit_code,
    }))
}

/// Fallback for every unmatched path or method: 404 plus the route map.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "endpoints": ENDPOINTS,
        })),
    )
}

// ── Validation helpers ────────────────────────────────────────────────────────

/// Take a required field, recording its name when absent or empty.
fn require_field(
    field: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Take a field that must be present but may be empty.
fn require_present(
    field: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match field {
        Some(value) => value,
        None => {
            missing.push(name);
            String::new()
        }
    }
}
