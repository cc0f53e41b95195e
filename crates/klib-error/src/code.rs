// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed vocabulary of application-level error codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application-level error classification, independent of transport status.
///
/// Each variant serialises to a `SCREAMING_SNAKE_CASE` string. The spelling
/// is part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The operation was aborted.
    Aborted,
    /// The entity being created already exists.
    AlreadyExists,
    /// Reading from or writing to a buffer failed.
    BufferError,
    /// The operation was canceled by the caller.
    Canceled,
    /// A precondition for the operation did not hold.
    ConditionFailed,
    /// A database operation failed.
    DatabaseError,
    /// Running an external command or task failed.
    ExecutionError,
    /// A deadline, token or resource has expired.
    Expired,
    /// A generic filesystem failure.
    FileError,
    /// Marker recording where an error was re-raised.
    ForwardedError,
    /// An invariant of the program itself was broken.
    InternalError,
    /// A value was present but invalid.
    InvalidValue,
    /// A required value was not provided.
    MissingValue,
    /// A network operation failed.
    NetworkError,
    /// The requested entity does not exist.
    NotFound,
    /// A file could not be opened.
    OpenFileError,
    /// Input could not be parsed.
    ParseError,
    /// Encoding or decoding a value failed.
    SerializationError,
    /// A value did not have the expected runtime type.
    TypeAssertionError,
    /// The caller is not authenticated.
    Unauthenticated,
    /// The caller is authenticated but not allowed to do this.
    Unauthorized,
    /// Content was well-formed but not what was expected.
    UnexpectedContent,
    /// The operation is not implemented.
    Unimplemented,
    /// The failure could not be classified.
    UnknownError,
    /// A value is valid but not supported.
    UnsupportedValue,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 25] = [
        Self::Aborted,
        Self::AlreadyExists,
        Self::BufferError,
        Self::Canceled,
        Self::ConditionFailed,
        Self::DatabaseError,
        Self::ExecutionError,
        Self::Expired,
        Self::FileError,
        Self::ForwardedError,
        Self::InternalError,
        Self::InvalidValue,
        Self::MissingValue,
        Self::NetworkError,
        Self::NotFound,
        Self::OpenFileError,
        Self::ParseError,
        Self::SerializationError,
        Self::TypeAssertionError,
        Self::Unauthenticated,
        Self::Unauthorized,
        Self::UnexpectedContent,
        Self::Unimplemented,
        Self::UnknownError,
        Self::UnsupportedValue,
    ];

    /// Stable `&'static str` representation of the code (e.g. `"NOT_FOUND"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aborted => "ABORTED",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::BufferError => "BUFFER_ERROR",
            Self::Canceled => "CANCELED",
            Self::ConditionFailed => "CONDITION_FAILED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::Expired => "EXPIRED",
            Self::FileError => "FILE_ERROR",
            Self::ForwardedError => "FORWARDED_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::InvalidValue => "INVALID_VALUE",
            Self::MissingValue => "MISSING_VALUE",
            Self::NetworkError => "NETWORK_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::OpenFileError => "OPEN_FILE_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::TypeAssertionError => "TYPE_ASSERTION_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnexpectedContent => "UNEXPECTED_CONTENT",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::UnsupportedValue => "UNSUPPORTED_VALUE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known [`ErrorCode`] spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}
