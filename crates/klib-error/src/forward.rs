// SPDX-License-Identifier: MIT OR Apache-2.0

//! Re-raising failures across boundaries while recording where it happened.

use std::fmt;

use tracing::debug;

use crate::{Error, ErrorChain, ErrorCode, status};

/// Identifier given to records synthesised from foreign failures.
pub const UNKNOWN_ERROR_ID: &str = "1cd23aa9-1844-4672-90d6-2158268bd2ce";

/// The closed set of shapes a failure can take when it is forwarded.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A single structured record.
    Single(Error),
    /// An existing causal trail.
    Chain(ErrorChain),
    /// Any other failure, reduced to its message.
    Opaque(String),
}

impl Failure {
    /// Wrap a foreign failure by its message.
    pub fn opaque(err: impl fmt::Display) -> Self {
        Self::Opaque(err.to_string())
    }

    /// Classify a borrowed error trait object, cloning structured shapes.
    pub fn classify(err: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(single) = err.downcast_ref::<Error>() {
            Self::Single(single.clone())
        } else if let Some(chain) = err.downcast_ref::<ErrorChain>() {
            Self::Chain(chain.clone())
        } else {
            Self::Opaque(err.to_string())
        }
    }

    /// Short name of the shape, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Chain(_) => "chain",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Normalise into a chain without appending a forward marker.
    pub fn into_chain(self) -> ErrorChain {
        match self {
            Self::Single(err) => ErrorChain::from(err),
            Self::Chain(chain) => chain,
            Self::Opaque(message) => ErrorChain::from(
                Error::new()
                    .with_id(UNKNOWN_ERROR_ID)
                    .with_status(status::INTERNAL_SERVER_ERROR)
                    .with_code(ErrorCode::UnknownError)
                    .with_cause(message),
            ),
        }
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Self::Single(err)
    }
}

impl From<ErrorChain> for Failure {
    fn from(chain: ErrorChain) -> Self {
        Self::Chain(chain)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Failure {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        let err = match err.downcast::<Error>() {
            Ok(single) => return Self::Single(*single),
            Err(other) => other,
        };
        match err.downcast::<ErrorChain>() {
            Ok(chain) => Self::Chain(*chain),
            Err(other) => Self::Opaque(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Self::opaque(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::opaque(err)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Opaque(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::Opaque(message.to_string())
    }
}

/// Wrap `err` into a chain and append a forward marker carrying `id`.
///
/// A single record becomes a one-element chain, a chain is used as-is, and
/// anything else is replaced by a synthesised [`ErrorCode::UnknownError`]
/// record whose `cause` holds the original message. The result always has
/// at least two records.
///
/// ```
/// use klib_error::{ErrorCode, forward_error};
///
/// let chain = forward_error("2f1ad5c6-load-user", "connection refused");
/// assert_eq!(chain.len(), 2);
/// assert_eq!(chain.first().unwrap().cause.as_deref(), Some("connection refused"));
/// assert!(chain.last().unwrap().has_code(ErrorCode::ForwardedError));
/// ```
pub fn forward_error(id: &str, err: impl Into<Failure>) -> ErrorChain {
    let failure = err.into();
    let shape = failure.shape();
    let chain = failure
        .into_chain()
        .add([Error::new().with_id(id).with_code(ErrorCode::ForwardedError)]);
    debug!(
        target: "klib.error",
        forward_id = id,
        shape,
        depth = chain.len(),
        "forwarded error"
    );
    chain
}

/// Forward the error side of a `Result` with [`forward_error`].
pub trait ForwardExt<T> {
    /// Map `Err(e)` to `Err(forward_error(id, e))`.
    fn forward(self, id: &str) -> Result<T, ErrorChain>;
}

impl<T, E: Into<Failure>> ForwardExt<T> for Result<T, E> {
    fn forward(self, id: &str) -> Result<T, ErrorChain> {
        self.map_err(|e| forward_error(id, e))
    }
}
