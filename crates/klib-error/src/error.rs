// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structured [`Error`] record and its [`HelpLink`]s.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::ErrorCode;

/// Transport status codes used by this crate.
pub mod status {
    /// The request was malformed or carried an invalid value.
    pub const BAD_REQUEST: u16 = 400;
    /// The server hit a failure it could not classify.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

// ---------------------------------------------------------------------------
// HelpLink
// ---------------------------------------------------------------------------

/// A pointer to documentation that helps resolve an [`Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    /// Describes what the link offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The URL of the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HelpLink {
    /// Create a link with both a description and a URL.
    pub fn new(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            url: Some(url.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A structured, serialisable error record, modelled on JSON:API error
/// objects.
///
/// Every field is optional and independent of the others. Records are plain
/// values: build them with the `with_*` methods and treat them as immutable
/// afterwards.
///
/// ```
/// use klib_error::{Error, ErrorCode};
///
/// let err = Error::new()
///     .with_id("5b0c43b6-9b4e-4a3c-8f0e-0c8fe0a5c2d1")
///     .with_code(ErrorCode::NotFound)
///     .with_detail("user 42 does not exist");
/// assert_eq!(
///     err.to_string(),
///     "id:5b0c43b6-9b4e-4a3c-8f0e-0c8fe0a5c2d1 detail:user 42 does not exist"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// A globally unique identifier of the site that raised the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The HTTP-style status code applicable to this problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Application-level classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,

    /// A secondary classifier, usable as a sub-code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Path to the offending field or resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Short summary that does not change between occurrences of the same
    /// problem, except for localisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// The raw message of whatever failed originally. Never localised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,

    /// How long a caller should wait before retrying.
    #[serde(
        default,
        skip_serializing_if = "is_no_delay",
        with = "retry_delay_nanos"
    )]
    pub retry_delay: Option<Duration>,

    /// Available help for the error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<HelpLink>,

    /// Non-standard extension data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl Error {
    /// An empty record. Chain the `with_*` methods to fill it in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the transport status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the application-level code.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the sub-code label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the path of the offending field or resource.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the stable summary.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the occurrence-specific explanation.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the raw underlying message.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Suggest a retry delay. [`Duration::ZERO`] means "no suggestion" and
    /// clears the field.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Append a help link.
    #[must_use]
    pub fn with_help(mut self, link: HelpLink) -> Self {
        self.help.push(link);
        self
    }

    /// Attach a meta entry.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.meta.insert(key.into(), v);
        }
        self
    }

    /// Whether this record carries the given code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }

    fn lead(&self) -> Option<String> {
        if let Some(id) = non_empty(&self.id) {
            return Some(format!("id:{id}"));
        }
        if let Some(code) = self.code {
            return Some(format!("code:{code}"));
        }
        self.status
            .filter(|s| *s != 0)
            .map(|s| format!("status:{s}"))
    }

    fn description(&self) -> Option<String> {
        if let Some(detail) = non_empty(&self.detail) {
            return Some(format!("detail:{detail}"));
        }
        if let Some(title) = non_empty(&self.title) {
            return Some(format!("title:{title}"));
        }
        non_empty(&self.cause).map(|cause| format!("cause:{cause}"))
    }
}

fn is_no_delay(delay: &Option<Duration>) -> bool {
    delay.is_none_or(|d| d.is_zero())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Render an optional record. An absent record renders as `""`.
pub fn render(err: Option<&Error>) -> String {
    err.map(ToString::to_string).unwrap_or_default()
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lead(), self.description()) {
            (Some(lead), Some(desc)) => write!(f, "{lead} {desc}"),
            (Some(only), None) | (None, Some(only)) => f.write_str(&only),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Error {}

/// `retryDelay` travels as integer nanoseconds; zero and absent are the same.
mod retry_delay_nanos {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(crate) fn serialize<S: Serializer>(
        delay: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let nanos = match delay {
            Some(d) => u64::try_from(d.as_nanos())
                .map_err(|_| S::Error::custom("retryDelay does not fit in u64 nanoseconds"))?,
            None => 0,
        };
        serializer.serialize_u64(nanos)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let nanos = Option::<u64>::deserialize(deserializer)?;
        Ok(nanos.filter(|n| *n != 0).map(Duration::from_nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_renders_empty() {
        assert_eq!(Error::new().to_string(), "");
    }

    #[test]
    fn absent_record_renders_empty() {
        assert_eq!(render(None), "");
    }

    #[test]
    fn present_record_renders_through_display() {
        let err = Error::new().with_code(ErrorCode::Expired);
        assert_eq!(render(Some(&err)), "code:EXPIRED");
    }

    #[test]
    fn id_leads_over_code_and_status() {
        let err = Error::new()
            .with_id("abc")
            .with_code(ErrorCode::NotFound)
            .with_status(404);
        assert_eq!(err.to_string(), "id:abc");
    }

    #[test]
    fn code_leads_when_id_missing() {
        let err = Error::new().with_code(ErrorCode::NotFound).with_status(404);
        assert_eq!(err.to_string(), "code:NOT_FOUND");
    }

    #[test]
    fn status_leads_when_nothing_else() {
        let err = Error::new().with_status(503).with_title("unavailable");
        assert_eq!(err.to_string(), "status:503 title:unavailable");
    }

    #[test]
    fn zero_status_is_ignored() {
        let err = Error::new().with_status(0);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn detail_beats_title_beats_cause() {
        let all = Error::new()
            .with_code(ErrorCode::ParseError)
            .with_detail("line 3")
            .with_title("bad input")
            .with_cause("eof");
        assert_eq!(all.to_string(), "code:PARSE_ERROR detail:line 3");

        let no_detail = Error::new().with_title("bad input").with_cause("eof");
        assert_eq!(no_detail.to_string(), "title:bad input");

        let only_cause = Error::new().with_cause("eof");
        assert_eq!(only_cause.to_string(), "cause:eof");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let err = Error::new().with_id("").with_detail("").with_cause("disk full");
        assert_eq!(err.to_string(), "cause:disk full");
    }

    #[test]
    fn zero_retry_delay_is_cleared() {
        let err = Error::new().with_retry_delay(Duration::ZERO);
        assert!(err.retry_delay.is_none());

        let err = Error::new().with_retry_delay(Duration::from_secs(2));
        assert_eq!(err.retry_delay, Some(Duration::from_secs(2)));
    }

    #[test]
    fn meta_accepts_structured_values() {
        let err = Error::new()
            .with_meta("attempt", 3)
            .with_meta("hosts", vec!["a", "b"]);
        assert_eq!(err.meta["attempt"], json!(3));
        assert_eq!(err.meta["hosts"], json!(["a", "b"]));
    }

    #[test]
    fn json_uses_camel_case_and_omits_absent() {
        let err = Error::new()
            .with_code(ErrorCode::Canceled)
            .with_retry_delay(Duration::from_millis(1500));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({"code": "CANCELED", "retryDelay": 1_500_000_000u64})
        );
    }

    #[test]
    fn json_zero_retry_delay_decodes_absent() {
        let err: Error = serde_json::from_str(r#"{"retryDelay":0}"#).unwrap();
        assert!(err.retry_delay.is_none());
    }

    #[test]
    fn json_omits_zero_retry_delay_set_directly() {
        let err = Error {
            retry_delay: Some(Duration::ZERO),
            ..Error::new()
        };
        assert_eq!(serde_json::to_string(&err).unwrap(), "{}");
    }

    #[test]
    fn json_rejects_retry_delay_beyond_u64_nanos() {
        let err = Error {
            retry_delay: Some(Duration::from_nanos(u64::MAX) + Duration::from_nanos(1)),
            ..Error::new()
        };
        assert!(serde_json::to_string(&err).is_err());
    }

    #[test]
    fn help_link_omits_absent_fields() {
        let link = HelpLink {
            description: None,
            url: Some("https://example.com/errors".into()),
        };
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            r#"{"url":"https://example.com/errors"}"#
        );
    }

    #[test]
    fn std_error_source_is_none() {
        let err = Error::new().with_cause("boom");
        assert!(std::error::Error::source(&err).is_none());
    }
}
