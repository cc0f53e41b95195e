// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered causal trail of [`Error`] records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Separator placed between records when a chain is rendered.
pub const CHAIN_SEPARATOR: &str = " => ";

/// An ordered sequence of [`Error`] records.
///
/// Index 0 is the earliest, innermost cause; the last index is the most
/// recent wrap. Rendering walks the other way, newest first.
///
/// [`ErrorChain::add`] takes the chain by value and returns the grown chain,
/// so a chain can never be extended behind the back of another owner.
///
/// ```
/// use klib_error::{Error, ErrorChain, ErrorCode};
///
/// let chain = ErrorChain::new()
///     .add([Error::new().with_cause("connection reset")])
///     .add([Error::new().with_code(ErrorCode::NetworkError)]);
/// assert_eq!(chain.to_string(), "code:NETWORK_ERROR => cause:connection reset");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorChain(Vec<Error>);

impl ErrorChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the chain with `errors` appended after the current most recent
    /// record, in iteration order.
    #[must_use]
    pub fn add(mut self, errors: impl IntoIterator<Item = Error>) -> Self {
        self.0.extend(errors);
        self
    }

    /// Append a single record in place.
    pub fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    /// The innermost cause, or `None` on an empty chain.
    pub fn first(&self) -> Option<&Error> {
        self.0.first()
    }

    /// The most recent wrap, or `None` on an empty chain.
    pub fn last(&self) -> Option<&Error> {
        self.0.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    /// Records as a slice, oldest first.
    pub fn as_slice(&self) -> &[Error] {
        &self.0
    }

    /// Consume the chain and return its records, oldest first.
    pub fn into_inner(self) -> Vec<Error> {
        self.0
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(CHAIN_SEPARATOR)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorChain {}

impl From<Error> for ErrorChain {
    fn from(err: Error) -> Self {
        Self(vec![err])
    }
}

impl From<Vec<Error>> for ErrorChain {
    fn from(errors: Vec<Error>) -> Self {
        Self(errors)
    }
}

impl FromIterator<Error> for ErrorChain {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorChain {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorChain {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
