//! Gateway configuration, sourced from the process environment.

use std::path::PathBuf;

/// Environment variable naming the listen address.
pub const ENV_LISTEN_ADDR: &str = "AIRLOCK_LISTEN_ADDR";
/// Environment variable carrying the static bearer token.
pub const ENV_AUTH_TOKEN: &str = "AIRLOCK_AUTH_TOKEN";
/// Environment variable naming the local sandbox state root.
pub const ENV_STATE_DIR: &str = "AIRLOCK_STATE_DIR";

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds, e.g. `127.0.0.1:8787`.
    pub listen_addr: String,
    /// Static bearer token protecting the sandbox routes.
    ///
    /// `None` disables the auth gate entirely; every request is accepted.
    pub auth_token: Option<String>,
    /// Directory the local sandbox backend keeps per-sandbox state under.
    pub state_dir: PathBuf,
}

impl GatewayConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// An `AIRLOCK_AUTH_TOKEN` that is set but empty counts as unset, so
    /// a stray `AIRLOCK_AUTH_TOKEN=` in a shell profile cannot lock every
    /// caller out.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var(ENV_LISTEN_ADDR).unwrap_or(defaults.listen_addr),
            auth_token: std::env::var(ENV_AUTH_TOKEN)
                .ok()
                .filter(|token| !token.is_empty()),
            state_dir: std::env::var(ENV_STATE_DIR)
                .map_or(defaults.state_dir, PathBuf::from),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8787".to_owned(),
            auth_token: None,
            state_dir: PathBuf::from("/tmp/airlock-sandboxes"),
        }
    }
}
