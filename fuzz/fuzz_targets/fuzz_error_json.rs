// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz JSON decoding of error records and forwarding of decoded chains.
#![no_main]
use klib_error::{codec, forward_error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Ok(err) = codec::from_json(s) {
        let _ = err.to_string();
        let chain = forward_error("fuzz", err.clone());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.first(), Some(&err));
    }

    if let Ok(chain) = codec::chain_from_json(s) {
        let n = chain.len();
        assert_eq!(forward_error("fuzz", chain).len(), n + 1);
    }
});
