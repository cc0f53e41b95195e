// SPDX-License-Identifier: MIT OR Apache-2.0
//! klib-util
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Small helpers that report failures through `klib-error` records.

mod handler;
pub mod must;
mod slice;

pub use handler::{HandlerPipeline, StringHandler};
pub use slice::{INDEX_OUT_OF_BOUNDS_ID, insert_slice_elem};
