//! Fuzz target: JSON deserialization of `WriteBody`.
//!
//! Verifies that arbitrary byte sequences fed to the write request
//! parser never cause panics or UB.

#![no_main]

use airlock_gateway::routes::WriteBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    let _ = serde_json::from_slice::<WriteBody>(data);
});
