//! Sandbox capability seam for the Airlock gateway.
//!
//! Defines the [`Sandbox`] / [`SandboxProvider`] traits the gateway calls
//! through, the error type those calls fail with, and a local development
//! backend that runs commands as host processes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod local;
pub mod provider;

pub use error::SandboxError;
pub use local::LocalSandboxProvider;
pub use provider::{Sandbox, SandboxProvider};
