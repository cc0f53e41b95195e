// SPDX-License-Identifier: MIT OR Apache-2.0
//! klib
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Facade over the klib crates: structured error chains
//! ([`error`]), small utilities ([`util`]) and process runtime information
//! ([`runtime`]).

pub use klib_error as error;
pub use klib_runtime as runtime;
pub use klib_util as util;

pub use klib_error::{
    Error, ErrorChain, ErrorCode, Failure, ForwardExt, HelpLink, forward_error,
};
pub use klib_runtime::{BuildInfo, DeployEnv, Runtime, RuntimeConfig};
pub use klib_util::{StringHandler, insert_slice_elem};
