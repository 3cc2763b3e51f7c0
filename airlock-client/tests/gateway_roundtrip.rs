//! End-to-end tests driving a real gateway over HTTP.
//!
//! Most tests bind a gateway to an ephemeral loopback port with a local
//! sandbox backend rooted in a fresh temporary directory, then talk to it
//! through [`SandboxClient`] exactly as an external caller would. The
//! interpreter-failure tests swap in a scripted backend instead.

use std::sync::Arc;

use airlock_client::{ClientError, SandboxClient};
use airlock_core::{ExecOutcome, SandboxId};
use airlock_gateway::config::GatewayConfig;
use airlock_gateway::routes::{create_router, AppState};
use airlock_sandbox::{LocalSandboxProvider, Sandbox, SandboxError, SandboxProvider};
use async_trait::async_trait;
use tempfile::TempDir;

async fn start_gateway(auth_token: Option<&str>) -> (String, TempDir) {
    let state_dir = tempfile::tempdir().expect("failed to create state dir");
    let config = GatewayConfig {
        listen_addr: "127.0.0.1:0".to_owned(),
        auth_token: auth_token.map(str::to_owned),
        state_dir: state_dir.path().to_path_buf(),
    };
    let provider = Arc::new(LocalSandboxProvider::new(state_dir.path()));
    let base_url = serve_gateway(provider, config).await;
    (base_url, state_dir)
}

async fn serve_gateway(provider: Arc<dyn SandboxProvider>, config: GatewayConfig) -> String {
    let app = create_router(AppState::new(provider, config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

/// Sandbox double whose commands run but always report failure.
struct UnhealthySandbox {
    stderr: &'static str,
    exit_code: i32,
}

#[async_trait]
impl Sandbox for UnhealthySandbox {
    async fn exec(&self, _command: &str) -> Result<ExecOutcome, SandboxError> {
        Ok(ExecOutcome {
            stdout: String::new(),
            stderr: self.stderr.to_owned(),
            exit_code: self.exit_code,
            success: false,
        })
    }

    async fn write_file(&self, _path: &str, _content: &str) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn read_file(&self, _path: &str) -> Result<String, SandboxError> {
        Ok(String::new())
    }
}

/// Provider double handing out [`UnhealthySandbox`] handles.
struct UnhealthyProvider {
    stderr: &'static str,
    exit_code: i32,
}

#[async_trait]
impl SandboxProvider for UnhealthyProvider {
    async fn handle(&self, _id: &SandboxId) -> Result<Box<dyn Sandbox>, SandboxError> {
        Ok(Box::new(UnhealthySandbox {
            stderr: self.stderr,
            exit_code: self.exit_code,
        }))
    }
}

async fn start_unhealthy_gateway(stderr: &'static str, exit_code: i32) -> String {
    let config = GatewayConfig {
        listen_addr: "127.0.0.1:0".to_owned(),
        auth_token: None,
        state_dir: std::env::temp_dir(),
    };
    serve_gateway(Arc::new(UnhealthyProvider { stderr, exit_code }), config).await
}

fn client_for(base_url: &str, token: Option<&str>) -> SandboxClient {
    let mut builder = SandboxClient::builder()
        .base_url(base_url)
        .sandbox_id("it-workspace");
    if let Some(token) = token {
        builder = builder.auth_token(token);
    }
    builder.build().expect("failed to build client")
}

#[tokio::test]
async fn exec_write_read_round_trip_through_http() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    let outcome = client.exec("printf hello").await.expect("exec failed");
    assert_eq!(outcome.stdout, "hello");
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.success);

    client
        .write_file("notes.txt", "from the client")
        .await
        .expect("write failed");
    let content = client.read_file("notes.txt").await.expect("read failed");
    assert_eq!(content, "from the client");
}

#[tokio::test]
async fn service_info_reports_the_gateway() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    let info = client.service_info().await.expect("service info failed");
    assert_eq!(info.status, "ok");
    assert_eq!(info.service, "airlock-gateway");
    assert!(!info.timestamp.is_empty());
}

#[tokio::test]
async fn clients_sharing_an_id_share_files() {
    let (base_url, _state) = start_gateway(None).await;
    let writer = client_for(&base_url, None);
    let reader = client_for(&base_url, None);

    writer
        .write_file("shared.txt", "visible to both")
        .await
        .expect("write failed");
    let content = reader.read_file("shared.txt").await.expect("read failed");
    assert_eq!(content, "visible to both");
}

#[tokio::test]
async fn distinct_sandbox_ids_do_not_share_files() {
    let (base_url, _state) = start_gateway(None).await;
    let one = client_for(&base_url, None);
    let other = SandboxClient::builder()
        .base_url(&base_url)
        .sandbox_id("another-workspace")
        .build()
        .expect("failed to build client");

    one.write_file("private.txt", "mine")
        .await
        .expect("write failed");
    let err = other
        .read_file("private.txt")
        .await
        .expect_err("read across sandboxes must fail");
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn auth_is_enforced_end_to_end() {
    let (base_url, _state) = start_gateway(Some("s3cret")).await;

    let anonymous = client_for(&base_url, None);
    let err = anonymous
        .exec("printf hi")
        .await
        .expect_err("anonymous exec must fail");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Authorization header required");
        }
        other => panic!("unexpected error: {other}"),
    }

    let wrong = client_for(&base_url, Some("nope"));
    let err = wrong
        .exec("printf hi")
        .await
        .expect_err("wrong token must fail");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("unexpected error: {other}"),
    }

    let authorized = client_for(&base_url, Some("s3cret"));
    let outcome = authorized
        .exec("printf hi")
        .await
        .expect("authorized exec failed");
    assert_eq!(outcome.stdout, "hi");
}

#[tokio::test]
async fn missing_file_error_carries_the_gateway_message() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    let err = client
        .read_file("no-such.txt")
        .await
        .expect_err("reading a missing file must fail");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(
                message.contains("no-such.txt"),
                "message must name the path, got: {message}"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn probe_round_trips_through_the_gateway() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    // The probe reports the command's exit code rather than failing, so
    // this holds whether or not the host has a python3 binary.
    let report = client.probe().await.expect("probe failed");
    assert_eq!(report.status, "healthy");
}

#[tokio::test]
async fn nonzero_exit_is_data_not_an_error() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    let outcome = client.exec("exit 7").await.expect("exec failed");
    assert_eq!(outcome.exit_code, 7);
    assert!(!outcome.success);
}

#[tokio::test]
async fn connect_and_run_python_round_trip() {
    let (base_url, _state) = start_gateway(None).await;
    let client = client_for(&base_url, None);

    // Runs the host's python3 through the local backend.
    client.connect().await.expect("connect failed");
    let outcome = client
        .run_python("print(6 * 7)")
        .await
        .expect("run_python failed");
    assert_eq!(outcome.stdout, "42\n");
    assert!(outcome.success);
}

#[tokio::test]
async fn connect_surfaces_the_interpreter_stderr() {
    let base_url = start_unhealthy_gateway("python3: command not found\n", 127).await;
    let client = client_for(&base_url, None);

    let err = client.connect().await.expect_err("connect must fail");
    match err {
        ClientError::ProbeFailed(detail) => assert_eq!(detail, "python3: command not found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn connect_falls_back_to_the_exit_code() {
    let base_url = start_unhealthy_gateway("", 9).await;
    let client = client_for(&base_url, None);

    let err = client.connect().await.expect_err("connect must fail");
    match err {
        ClientError::ProbeFailed(detail) => assert_eq!(detail, "exit code 9"),
        other => panic!("unexpected error: {other}"),
    }
}
