// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque build description (app version, commit, build number, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildInfo(String);

impl BuildInfo {
    /// Wrap an arbitrary build string.
    pub fn new(info: impl Into<String>) -> Self {
        Self(info.into())
    }

    /// Read `KLIB_BUILD_INFO` as it was when this crate was compiled.
    /// Empty when the variable was unset.
    pub fn from_env() -> Self {
        Self(option_env!("KLIB_BUILD_INFO").unwrap_or_default().to_string())
    }

    /// The build string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no build information was provided.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
