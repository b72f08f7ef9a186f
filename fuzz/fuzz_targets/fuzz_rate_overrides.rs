//! Fuzz target: parsing of `WIDGET_RATE_OVERRIDES` values.
//!
//! Any UTF-8 input must either parse or produce a `ConfigError`; parsed
//! routes always start with '/'.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stack_gateway::config::parse_overrides;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(entries) = parse_overrides(raw) {
        for (route, _) in entries {
            assert!(route.starts_with('/'), "parsed route must be absolute: {route}");
        }
    }
});
