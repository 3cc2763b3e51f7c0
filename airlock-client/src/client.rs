//! Async client for the gateway's sandbox surface.

use std::time::Duration;

use airlock_core::{
    ErrorBody, ExecOutcome, ProbeReport, ReadResponse, SandboxId, ServiceInfo, WriteAck,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::error::ClientError;

/// Environment variable naming the gateway base URL.
pub const ENV_BASE_URL: &str = "AIRLOCK_BASE_URL";
/// Environment variable carrying the bearer token.
pub const ENV_AUTH_TOKEN: &str = "AIRLOCK_AUTH_TOKEN";

/// Default request timeout, sized for long-running commands.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Command used to verify that a sandbox can actually execute code.
const VERIFY_COMMAND: &str = "python3 --version";

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`SandboxClient`].
#[derive(Default)]
pub struct SandboxClientBuilder {
    base_url: Option<String>,
    auth_token: Option<String>,
    sandbox_id: Option<SandboxId>,
    timeout: Option<Duration>,
}

impl SandboxClientBuilder {
    /// Gateway base URL, e.g. `http://127.0.0.1:8787`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bearer token sent with every request.
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sandbox this client scopes its operations to.
    ///
    /// When not set, a fresh `sandbox-<uuid>` id is minted so two clients
    /// never collide by accident.
    #[must_use]
    pub fn sandbox_id(mut self, id: impl Into<SandboxId>) -> Self {
        self.sandbox_id = Some(id.into());
        self
    }

    /// Per-request timeout. Defaults to five minutes.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finish the builder.
    ///
    /// # Errors
    /// [`ClientError::MissingBaseUrl`] when no base URL was supplied,
    /// [`ClientError::InvalidBaseUrl`] when it does not parse, and
    /// [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn build(self) -> Result<SandboxClient, ClientError> {
        let raw = self.base_url.ok_or(ClientError::MissingBaseUrl)?;
        let base_url = raw.trim_end_matches('/').to_owned();
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(SandboxClient {
            http,
            base_url,
            auth_token: self.auth_token,
            sandbox_id: self.sandbox_id.unwrap_or_else(SandboxId::random),
        })
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Client for one sandbox behind an Airlock gateway.
///
/// Cloning is cheap; clones share the underlying connection pool and talk to
/// the same sandbox.
#[derive(Clone)]
pub struct SandboxClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    sandbox_id: SandboxId,
}

impl SandboxClient {
    /// Start building a client.
    #[must_use]
    pub fn builder() -> SandboxClientBuilder {
        SandboxClientBuilder::default()
    }

    /// Build a client from `AIRLOCK_BASE_URL` and `AIRLOCK_AUTH_TOKEN`.
    ///
    /// An empty token variable counts as unset, matching the gateway's own
    /// reading of its token variable.
    ///
    /// # Errors
    /// [`ClientError::MissingBaseUrl`] when `AIRLOCK_BASE_URL` is unset, plus
    /// everything [`SandboxClientBuilder::build`] can return.
    pub fn from_env() -> Result<Self, ClientError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            builder = builder.base_url(url);
        }
        if let Ok(token) = std::env::var(ENV_AUTH_TOKEN) {
            if !token.is_empty() {
                builder = builder.auth_token(token);
            }
        }
        builder.build()
    }

    /// The sandbox this client operates on.
    #[must_use]
    pub fn sandbox_id(&self) -> &SandboxId {
        &self.sandbox_id
    }

    /// The gateway base URL, with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// Run a shell command in the sandbox.
    ///
    /// A non-zero exit is reported inside the returned [`ExecOutcome`], not
    /// as an error; `Err` means the request itself failed.
    ///
    /// # Errors
    /// [`ClientError::Transport`] or [`ClientError::Api`].
    pub async fn exec(&self, command: &str) -> Result<ExecOutcome, ClientError> {
        let body = json!({
            "sandbox_id": self.sandbox_id.as_str(),
            "command": command,
        });
        let response = self
            .authorize(self.http.post(self.endpoint("/sandbox/exec")))
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Write a file into the sandbox, creating parent directories as needed.
    ///
    /// # Errors
    /// [`ClientError::Transport`] or [`ClientError::Api`].
    pub async fn write_file(&self, path: &str, content: &str) -> Result<(), ClientError> {
        let body = json!({
            "sandbox_id": self.sandbox_id.as_str(),
            "path": path,
            "content": content,
        });
        let response = self
            .authorize(self.http.post(self.endpoint("/sandbox/write")))
            .json(&body)
            .send()
            .await?;
        let _ack: WriteAck = Self::parse(response).await?;
        Ok(())
    }

    /// Read a file from the sandbox.
    ///
    /// # Errors
    /// [`ClientError::Transport`] or [`ClientError::Api`]; a missing file
    /// surfaces as an `Api` error carrying the gateway's message.
    pub async fn read_file(&self, path: &str) -> Result<String, ClientError> {
        let response = self
            .authorize(self.http.get(self.endpoint("/sandbox/read")))
            .query(&[("sandbox_id", self.sandbox_id.as_str()), ("path", path)])
            .send()
            .await?;
        let body: ReadResponse = Self::parse(response).await?;
        Ok(body.content)
    }

    /// Ask the gateway to probe this client's sandbox end to end.
    ///
    /// # Errors
    /// [`ClientError::Transport`] or [`ClientError::Api`].
    pub async fn probe(&self) -> Result<ProbeReport, ClientError> {
        let response = self
            .authorize(self.http.get(self.endpoint("/sandbox/health")))
            .query(&[("sandbox_id", self.sandbox_id.as_str())])
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Fetch the gateway's liveness document.
    ///
    /// # Errors
    /// [`ClientError::Transport`] or [`ClientError::Api`].
    pub async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        let response = self.http.get(self.endpoint("/health")).send().await?;
        Self::parse(response).await
    }

    /// Verify the gateway and the sandbox are usable end to end.
    ///
    /// Runs `python3 --version` in the sandbox and fails when the command
    /// itself cannot succeed there.
    ///
    /// # Errors
    /// [`ClientError::ProbeFailed`] when the probe command exits non-zero,
    /// plus everything [`Self::exec`] can return.
    pub async fn connect(&self) -> Result<(), ClientError> {
        let outcome = self.exec(VERIFY_COMMAND).await?;
        if !outcome.success {
            let detail = if outcome.stderr.trim().is_empty() {
                format!("exit code {}", outcome.exit_code)
            } else {
                outcome.stderr.trim().to_owned()
            };
            return Err(ClientError::ProbeFailed(detail));
        }
        tracing::info!(
            python = %outcome.stdout.trim(),
            sandbox = %self.sandbox_id,
            "gateway verified"
        );
        Ok(())
    }

    /// Upload a Python script into the sandbox and run it.
    ///
    /// The script lands under a unique name in the sandbox working
    /// directory, so concurrent runs through one client cannot clobber
    /// each other.
    ///
    /// # Errors
    /// Everything [`Self::write_file`] and [`Self::exec`] can return.
    pub async fn run_python(&self, code: &str) -> Result<ExecOutcome, ClientError> {
        let hex = Uuid::new_v4().simple().to_string();
        let path = format!("run-{}.py", &hex[..8]);
        self.write_file(&path, code).await?;
        self.exec(&format!("python3 {path}")).await
    }

    // ── Request plumbing ──────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check the status and decode the body, turning error responses into
    /// [`ClientError::Api`] with the gateway's own message when present.
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) if !text.is_empty() => text,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(builder: SandboxClientBuilder) -> SandboxClient {
        match builder.build() {
            Ok(client) => client,
            Err(e) => panic!("build failed: {e}"),
        }
    }

    #[test]
    fn builder_requires_a_base_url() {
        match SandboxClient::builder().build() {
            Err(ClientError::MissingBaseUrl) => {}
            Err(e) => panic!("wrong error: {e}"),
            Ok(_) => panic!("build must fail without a base URL"),
        }
    }

    #[test]
    fn builder_rejects_unparseable_urls() {
        match SandboxClient::builder().base_url("not a url").build() {
            Err(ClientError::InvalidBaseUrl(_)) => {}
            Err(e) => panic!("wrong error: {e}"),
            Ok(_) => panic!("build must fail on a bad URL"),
        }
    }

    #[test]
    fn builder_trims_trailing_slashes() {
        let client = built(SandboxClient::builder().base_url("http://localhost:8787///"));
        assert_eq!(client.base_url(), "http://localhost:8787");
    }

    #[test]
    fn default_sandbox_id_is_minted_with_prefix() {
        let a = built(SandboxClient::builder().base_url("http://localhost:8787"));
        let b = built(SandboxClient::builder().base_url("http://localhost:8787"));
        assert!(a.sandbox_id().as_str().starts_with("sandbox-"));
        assert_ne!(a.sandbox_id(), b.sandbox_id(), "minted ids must be unique");
    }

    #[test]
    fn explicit_sandbox_id_is_kept_verbatim() {
        let client = built(
            SandboxClient::builder()
                .base_url("http://localhost:8787")
                .sandbox_id("workspace-7"),
        );
        assert_eq!(client.sandbox_id().as_str(), "workspace-7");
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = built(SandboxClient::builder().base_url("http://localhost:8787/"));
        assert_eq!(
            client.endpoint("/sandbox/exec"),
            "http://localhost:8787/sandbox/exec"
        );
    }
}
