//! Fuzz target: bearer-token extraction from `Authorization` values.
//!
//! Verifies that arbitrary header text never panics the parser and that
//! an extracted token is always a trimmed substring of the input.

#![no_main]

use airlock_gateway::auth::bearer_token;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };

    if let Some(token) = bearer_token(value) {
        assert!(
            !token.starts_with(' '),
            "extracted token must not keep leading padding"
        );
        assert!(
            value.contains(token),
            "extracted token must come from the input"
        );
    }
});
