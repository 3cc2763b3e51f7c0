//! HTTP facade for the Airlock managed-sandbox platform.
//!
//! Forwards bearer-gated exec, write, and read requests onto a
//! [`airlock_sandbox::SandboxProvider`] and shapes the results as the JSON
//! wire contract the client SDK expects.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
