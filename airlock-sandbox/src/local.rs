//! Local development backend.
//!
//! Runs sandbox commands as plain host processes with a per-id working
//! directory, so the gateway binary and the integration tests have a real
//! collaborator without a managed platform behind them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use airlock_core::{ExecOutcome, SandboxId};

use crate::provider::{Sandbox, SandboxProvider};
use crate::SandboxError;

/// Development backend that runs sandboxes as plain host processes.
///
/// Each id gets a private working directory under `root`; commands run
/// through `sh -c` with that directory as their cwd, and relative file
/// paths resolve into it. Absolute paths address the host filesystem
/// directly. State for an id survives as long as its directory does, which
/// gives the same session affinity a managed platform keys on the id.
///
/// # Isolation note
/// This backend provides affinity, not isolation: nothing confines the
/// spawned processes. Deployments point the gateway at a managed
/// platform's provider instead.
#[derive(Debug, Clone)]
pub struct LocalSandboxProvider {
    /// Directory holding one subdirectory per sandbox id.
    root: PathBuf,
}

impl LocalSandboxProvider {
    /// Create a provider that keeps per-sandbox state under `root`.
    ///
    /// The directory is created lazily on the first handle request.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SandboxProvider for LocalSandboxProvider {
    async fn handle(&self, id: &SandboxId) -> Result<Box<dyn Sandbox>, SandboxError> {
        let dir = self.root.join(state_dir_name(id));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| file_error(&dir, e))?;
        tracing::debug!(sandbox_id = %id, dir = %dir.display(), "local sandbox ready");
        Ok(Box::new(LocalSandbox { dir }))
    }
}

/// Handle to one local sandbox directory.
#[derive(Debug)]
struct LocalSandbox {
    dir: PathBuf,
}

impl LocalSandbox {
    /// Relative paths live inside the sandbox directory; absolute paths
    /// are taken as-is.
    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.dir.join(p)
        }
    }
}

#[async_trait]
impl Sandbox for LocalSandbox {
    async fn exec(&self, command: &str) -> Result<ExecOutcome, SandboxError> {
        tracing::debug!(dir = %self.dir.display(), "executing command");
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.dir)
            .output()
            .await
            .map_err(|e| SandboxError::Launch(e.to_string()))?;

        Ok(ExecOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), SandboxError> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| file_error(parent, e))?;
        }
        tokio::fs::write(&target, content)
            .await
            .map_err(|e| file_error(&target, e))
    }

    async fn read_file(&self, path: &str) -> Result<String, SandboxError> {
        let target = self.resolve(path);
        tokio::fs::read_to_string(&target)
            .await
            .map_err(|e| file_error(&target, e))
    }
}

fn file_error(path: &Path, source: std::io::Error) -> SandboxError {
    SandboxError::File { path: path.display().to_string(), source }
}

/// Map an opaque sandbox id to a directory name.
///
/// SHA-256 hex of the id, so arbitrary ids (including ones containing
/// path separators or `..`) can neither collide nor escape the state root.
fn state_dir_name(id: &SandboxId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_str().as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}
