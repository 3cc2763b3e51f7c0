//! Rust client for the Airlock sandbox gateway.
//!
//! Wraps the gateway's HTTP surface in a typed API scoped to one sandbox:
//!
//! ```no_run
//! use airlock_client::SandboxClient;
//!
//! # async fn demo() -> Result<(), airlock_client::ClientError> {
//! let client = SandboxClient::builder()
//!     .base_url("http://127.0.0.1:8787")
//!     .build()?;
//! client.write_file("hello.py", "print(\"hi\")").await?;
//! let outcome = client.exec("python3 hello.py").await?;
//! assert_eq!(outcome.stdout, "hi\n");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod error;

pub use client::{SandboxClient, SandboxClientBuilder};
pub use error::ClientError;
