// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured error records and causal error chains.
//!
//! An [`Error`] is a serialisable record with identity, classification and
//! human-readable text. An [`ErrorChain`] is an ordered trail of records,
//! innermost cause first. [`forward_error`] re-raises any failure across a
//! boundary and appends a marker recording where that happened.
//!
//! ```
//! use klib_error::{Error, ErrorCode, ForwardExt};
//!
//! fn load() -> Result<String, std::io::Error> {
//!     Err(std::io::Error::other("permission denied"))
//! }
//!
//! let chain = load().forward("c9a3e1f2-load-config").unwrap_err();
//! assert_eq!(chain.len(), 2);
//! assert!(chain.last().unwrap().has_code(ErrorCode::ForwardedError));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod chain;
pub mod codec;
mod code;
mod error;
mod forward;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use chain::{CHAIN_SEPARATOR, ErrorChain};
pub use code::{ErrorCode, UnknownCode};
pub use codec::CodecError;
pub use error::{Error, HelpLink, render, status};
pub use forward::{Failure, ForwardExt, UNKNOWN_ERROR_ID, forward_error};
