//! Fuzz target: JSON deserialization of `ExecBody`.
//!
//! Verifies that arbitrary byte sequences fed to the exec request
//! parser never cause panics or UB.

#![no_main]

use airlock_gateway::routes::ExecBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    let _ = serde_json::from_slice::<ExecBody>(data);
});
