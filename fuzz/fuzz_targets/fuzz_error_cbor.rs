// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz CBOR decoding of error records and chains.
//!
//! Verifies:
//! 1. Decoding arbitrary bytes never panics.
//! 2. Anything that decodes re-encodes and decodes to the same value.
//! 3. Rendering a decoded chain never panics.
#![no_main]
use klib_error::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(err) = codec::from_cbor(data) {
        let bytes = codec::to_cbor(&err).expect("decoded record must re-encode");
        let back = codec::from_cbor(&bytes).expect("re-encoded record must decode");
        assert_eq!(back, err);
        let _ = err.to_string();
    }

    if let Ok(chain) = codec::chain_from_cbor(data) {
        let _ = chain.to_string();
        let _ = chain.first();
        let _ = chain.last();
    }
});
