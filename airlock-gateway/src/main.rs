//! Entry point for the `airlock-gateway` HTTP server.

use std::sync::Arc;

use airlock_gateway::config::GatewayConfig;
use airlock_gateway::routes::{create_router, AppState};
use airlock_sandbox::LocalSandboxProvider;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    let addr = config.listen_addr.clone();
    info!(
        addr = %addr,
        auth_enabled = config.auth_token.is_some(),
        state_dir = %config.state_dir.display(),
        "starting gateway"
    );

    let provider = Arc::new(LocalSandboxProvider::new(config.state_dir.clone()));
    let app = create_router(AppState::new(provider, config));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "airlock-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
