// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire codecs for [`Error`] records and [`ErrorChain`]s.
//!
//! Two independent formats share one field set:
//!
//! * JSON, keyed by camelCase field names.
//! * CBOR, a map keyed by small integers. `Error` uses keys 1 through 11 in
//!   declaration order (`id` = 1 ... `meta` = 11); `HelpLink` uses
//!   1 (`description`) and 2 (`url`).
//!
//! Both omit absent fields. The integer assignment is a wire contract and
//! must never be renumbered.

use ciborium::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::{Error, ErrorChain, ErrorCode, HelpLink, UnknownCode, status};

/// Identifier of records produced from codec failures.
pub const CODEC_ERROR_ID: &str = "6f2d6a3e-0f7b-4c52-9a51-3b1f4e2a8c17";

mod key {
    pub(super) const ID: u64 = 1;
    pub(super) const STATUS: u64 = 2;
    pub(super) const CODE: u64 = 3;
    pub(super) const LABEL: u64 = 4;
    pub(super) const PATH: u64 = 5;
    pub(super) const TITLE: u64 = 6;
    pub(super) const DETAIL: u64 = 7;
    pub(super) const CAUSE: u64 = 8;
    pub(super) const RETRY_DELAY: u64 = 9;
    pub(super) const HELP: u64 = 10;
    pub(super) const META: u64 = 11;

    pub(super) const HELP_DESCRIPTION: u64 = 1;
    pub(super) const HELP_URL: u64 = 2;
}

/// Errors from encoding or decoding error records.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON encoding or decoding failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR encoding or decoding failed at the byte level.
    #[error("cbor: {0}")]
    Cbor(String),

    /// A CBOR field held a value of the wrong type.
    #[error("field `{field}`: expected {expected}")]
    UnexpectedType {
        /// Name of the field being decoded.
        field: &'static str,
        /// The CBOR type that was expected.
        expected: &'static str,
    },

    /// A numeric CBOR field did not fit its Rust type.
    #[error("field `{field}`: value out of range")]
    OutOfRange {
        /// Name of the field being decoded.
        field: &'static str,
    },

    /// The `code` field held an unrecognised spelling.
    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Error::new()
            .with_id(CODEC_ERROR_ID)
            .with_status(status::INTERNAL_SERVER_ERROR)
            .with_code(ErrorCode::SerializationError)
            .with_cause(err.to_string())
    }
}

impl From<CodecError> for crate::Failure {
    fn from(err: CodecError) -> Self {
        Self::Single(err.into())
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Encode a record as JSON.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if a meta value cannot be serialised or
/// `retry_delay` exceeds `u64` nanoseconds.
pub fn to_json(err: &Error) -> Result<String, CodecError> {
    Ok(serde_json::to_string(err)?)
}

/// Decode a record from JSON.
///
/// # Errors
///
/// Returns [`CodecError::Json`] on malformed input or an unknown code.
pub fn from_json(input: &str) -> Result<Error, CodecError> {
    Ok(serde_json::from_str(input)?)
}

/// Encode a chain as a JSON array, oldest record first.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if a meta value cannot be serialised or
/// `retry_delay` exceeds `u64` nanoseconds.
pub fn chain_to_json(chain: &ErrorChain) -> Result<String, CodecError> {
    Ok(serde_json::to_string(chain)?)
}

/// Decode a chain from a JSON array.
///
/// # Errors
///
/// Returns [`CodecError::Json`] on malformed input.
pub fn chain_from_json(input: &str) -> Result<ErrorChain, CodecError> {
    Ok(serde_json::from_str(input)?)
}

// ---------------------------------------------------------------------------
// CBOR
// ---------------------------------------------------------------------------

/// Encode a record as an integer-keyed CBOR map.
///
/// # Errors
///
/// Returns [`CodecError::Cbor`] if a meta value cannot be represented, or
/// [`CodecError::OutOfRange`] if `retry_delay` exceeds `u64` nanoseconds.
pub fn to_cbor(err: &Error) -> Result<Vec<u8>, CodecError> {
    write_cbor(&error_to_value(err)?)
}

/// Decode a record from an integer-keyed CBOR map. Unknown keys are skipped.
///
/// # Errors
///
/// Returns a [`CodecError`] on malformed bytes or mistyped fields.
pub fn from_cbor(bytes: &[u8]) -> Result<Error, CodecError> {
    error_from_value(read_cbor(bytes)?)
}

/// Encode a chain as a CBOR array of records, oldest first.
///
/// # Errors
///
/// Returns [`CodecError::Cbor`] if a meta value cannot be represented, or
/// [`CodecError::OutOfRange`] if `retry_delay` exceeds `u64` nanoseconds.
pub fn chain_to_cbor(chain: &ErrorChain) -> Result<Vec<u8>, CodecError> {
    let items = chain
        .iter()
        .map(error_to_value)
        .collect::<Result<Vec<_>, _>>()?;
    write_cbor(&Value::Array(items))
}

/// Decode a chain from a CBOR array of records.
///
/// # Errors
///
/// Returns a [`CodecError`] on malformed bytes or mistyped records.
pub fn chain_from_cbor(bytes: &[u8]) -> Result<ErrorChain, CodecError> {
    let Value::Array(items) = read_cbor(bytes)? else {
        return Err(CodecError::UnexpectedType {
            field: "chain",
            expected: "array",
        });
    };
    items.into_iter().map(error_from_value).collect()
}

fn write_cbor(value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CodecError::Cbor(e.to_string()))?;
    Ok(buf)
}

fn read_cbor(bytes: &[u8]) -> Result<Value, CodecError> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::Cbor(e.to_string()))
}

fn put(entries: &mut Vec<(Value, Value)>, key: u64, value: Value) {
    entries.push((Value::Integer(key.into()), value));
}

fn put_text(entries: &mut Vec<(Value, Value)>, key: u64, field: &Option<String>) {
    if let Some(text) = field {
        put(entries, key, Value::Text(text.clone()));
    }
}

fn error_to_value(err: &Error) -> Result<Value, CodecError> {
    let mut entries = Vec::new();
    put_text(&mut entries, key::ID, &err.id);
    if let Some(status) = err.status {
        put(&mut entries, key::STATUS, Value::Integer(status.into()));
    }
    if let Some(code) = err.code {
        put(&mut entries, key::CODE, Value::Text(code.as_str().to_string()));
    }
    put_text(&mut entries, key::LABEL, &err.label);
    put_text(&mut entries, key::PATH, &err.path);
    put_text(&mut entries, key::TITLE, &err.title);
    put_text(&mut entries, key::DETAIL, &err.detail);
    put_text(&mut entries, key::CAUSE, &err.cause);
    if let Some(delay) = err.retry_delay.filter(|d| !d.is_zero()) {
        let nanos = u64::try_from(delay.as_nanos())
            .map_err(|_| CodecError::OutOfRange { field: "retryDelay" })?;
        put(&mut entries, key::RETRY_DELAY, Value::Integer(nanos.into()));
    }
    if !err.help.is_empty() {
        let links = err.help.iter().map(help_to_value).collect();
        put(&mut entries, key::HELP, Value::Array(links));
    }
    if !err.meta.is_empty() {
        let meta = err
            .meta
            .iter()
            .map(|(k, v)| {
                Value::serialized(v)
                    .map(|v| (Value::Text(k.clone()), v))
                    .map_err(|e| CodecError::Cbor(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        put(&mut entries, key::META, Value::Map(meta));
    }
    Ok(Value::Map(entries))
}

fn help_to_value(link: &HelpLink) -> Value {
    let mut entries = Vec::new();
    put_text(&mut entries, key::HELP_DESCRIPTION, &link.description);
    put_text(&mut entries, key::HELP_URL, &link.url);
    Value::Map(entries)
}

fn int_key(key: &Value) -> Option<u64> {
    match key {
        Value::Integer(i) => u64::try_from(*i).ok(),
        _ => None,
    }
}

fn text(value: Value, field: &'static str) -> Result<String, CodecError> {
    match value {
        Value::Text(s) => Ok(s),
        _ => Err(CodecError::UnexpectedType {
            field,
            expected: "text",
        }),
    }
}

fn uint(value: Value, field: &'static str) -> Result<u64, CodecError> {
    match value {
        Value::Integer(i) => u64::try_from(i).map_err(|_| CodecError::OutOfRange { field }),
        _ => Err(CodecError::UnexpectedType {
            field,
            expected: "unsigned integer",
        }),
    }
}

fn map(value: Value, field: &'static str) -> Result<Vec<(Value, Value)>, CodecError> {
    match value {
        Value::Map(entries) => Ok(entries),
        _ => Err(CodecError::UnexpectedType {
            field,
            expected: "map",
        }),
    }
}

fn error_from_value(value: Value) -> Result<Error, CodecError> {
    let mut err = Error::new();
    for (k, v) in map(value, "error")? {
        let Some(k) = int_key(&k) else { continue };
        match k {
            key::ID => err.id = Some(text(v, "id")?),
            key::STATUS => {
                let status = uint(v, "status")?;
                err.status = Some(
                    u16::try_from(status).map_err(|_| CodecError::OutOfRange { field: "status" })?,
                );
            }
            key::CODE => err.code = Some(text(v, "code")?.parse::<ErrorCode>()?),
            key::LABEL => err.label = Some(text(v, "label")?),
            key::PATH => err.path = Some(text(v, "path")?),
            key::TITLE => err.title = Some(text(v, "title")?),
            key::DETAIL => err.detail = Some(text(v, "detail")?),
            key::CAUSE => err.cause = Some(text(v, "cause")?),
            key::RETRY_DELAY => {
                let nanos = uint(v, "retryDelay")?;
                err.retry_delay = (nanos != 0).then(|| Duration::from_nanos(nanos));
            }
            key::HELP => {
                let Value::Array(links) = v else {
                    return Err(CodecError::UnexpectedType {
                        field: "help",
                        expected: "array",
                    });
                };
                err.help = links
                    .into_iter()
                    .map(help_from_value)
                    .collect::<Result<_, _>>()?;
            }
            key::META => err.meta = meta_from_value(v)?,
            _ => {}
        }
    }
    Ok(err)
}

fn help_from_value(value: Value) -> Result<HelpLink, CodecError> {
    let mut link = HelpLink::default();
    for (k, v) in map(value, "help")? {
        match int_key(&k) {
            Some(key::HELP_DESCRIPTION) => link.description = Some(text(v, "help.description")?),
            Some(key::HELP_URL) => link.url = Some(text(v, "help.url")?),
            _ => {}
        }
    }
    Ok(link)
}

fn meta_from_value(value: Value) -> Result<BTreeMap<String, serde_json::Value>, CodecError> {
    map(value, "meta")?
        .into_iter()
        .map(|(k, v)| -> Result<(String, serde_json::Value), CodecError> {
            let k = text(k, "meta key")?;
            let v = v
                .deserialized::<serde_json::Value>()
                .map_err(|e| CodecError::Cbor(e.to_string()))?;
            Ok((k, v))
        })
        .collect()
}
