// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assertions for test suites that produce [`Error`] records.

use crate::{Error, ErrorChain};

/// Assert that `have` carries the same `id`, `status`, `code`, and `path` as
/// `want`. Descriptive text is not compared.
///
/// # Panics
///
/// Panics with a field-specific message on the first mismatch.
#[track_caller]
pub fn assert_error_matches(have: &Error, want: &Error) {
    assert_eq!(have.id, want.id, "Error.id mismatch");
    assert_eq!(have.status, want.status, "Error.status mismatch");
    assert_eq!(have.code, want.code, "Error.code mismatch");
    assert_eq!(have.path, want.path, "Error.path mismatch");
}

/// Check a fallible result against an optional expected error.
///
/// Returns `Some(value)` when both sides agree there is no error, `None`
/// when the expected error was produced.
///
/// # Panics
///
/// Panics if an error was expected but none occurred, if an unexpected
/// error occurred, or if the produced error does not match.
#[track_caller]
pub fn check_result<T>(result: Result<T, Error>, want: Option<&Error>) -> Option<T> {
    match (result, want) {
        (Ok(value), None) => Some(value),
        (Ok(_), Some(want)) => panic!("expected error {want}, got none"),
        (Err(have), None) => panic!("unexpected error: {have}"),
        (Err(have), Some(want)) => {
            assert_error_matches(&have, want);
            None
        }
    }
}

/// Assert that `chain` holds exactly the given ids, oldest first.
///
/// # Panics
///
/// Panics if the ids differ.
#[track_caller]
pub fn assert_chain_ids(chain: &ErrorChain, ids: &[&str]) {
    let have: Vec<&str> = chain.iter().map(|e| e.id.as_deref().unwrap_or("")).collect();
    assert_eq!(have, ids, "ErrorChain ids mismatch");
}
