//! Core types for the Airlock sandbox gateway.
//!
//! Defines the opaque sandbox identifier and the JSON wire shapes the
//! gateway serves and the client SDK consumes. Behavior lives in the
//! `airlock-sandbox` and `airlock-gateway` crates; this crate is the
//! contract they agree on.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod id;
pub mod wire;

pub use id::SandboxId;
pub use wire::{ErrorBody, ExecOutcome, ProbeReport, ReadResponse, ServiceInfo, WriteAck};
