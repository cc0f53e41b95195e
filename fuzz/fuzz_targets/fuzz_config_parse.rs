// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz RuntimeConfig TOML parsing and validation.
//!
//! Verifies:
//! 1. `parse_toml` never panics on arbitrary input.
//! 2. Successfully parsed configs can be validated without panics.
//! 3. Round-trip: serialize back to TOML and re-parse produces the same config.
#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    let config = match klib_runtime::parse_toml(s) {
        Ok(c) => c,
        Err(_) => return,
    };

    if let Err(e) = klib_runtime::validate_config(&config) {
        let _ = format!("{e}");
    }

    if let Ok(toml_str) = toml::to_string(&config) {
        if let Ok(rt) = klib_runtime::parse_toml(&toml_str) {
            assert_eq!(config, rt, "TOML round-trip must be lossless");
        }
    }
});
