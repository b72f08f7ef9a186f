//! Fuzz target: JSON deserialization of `NewWidget` bodies.
//!
//! Verifies that arbitrary byte sequences fed to the JSON parser never cause
//! panics, and that accepted bodies survive re-encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stack_core::NewWidget;

fuzz_target!(|data: &[u8]| {
    let Ok(request) = serde_json::from_slice::<NewWidget>(data) else {
        return;
    };
    let json = serde_json::to_string(&request).expect("NewWidget serialization must not fail");
    let again: NewWidget =
        serde_json::from_str(&json).expect("re-encoded NewWidget must deserialize");
    assert_eq!(again, request);
});
