//! Fuzz target: wire-type round trips.
//!
//! Verifies that any `ExecOutcome` the deserializer accepts can be
//! re-serialized without panicking.

#![no_main]

use airlock_core::ExecOutcome;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(outcome) = serde_json::from_slice::<ExecOutcome>(data) {
        let json = serde_json::to_string(&outcome).expect("accepted outcome must re-serialize");
        let _: ExecOutcome =
            serde_json::from_str(&json).expect("serialized outcome must parse back");
    }
});
