// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The environment a process is deployed into.
///
/// Each variant has a stable numeric value (see [`DeployEnv::as_i32`]),
/// spaced so that new environments can be slotted in between.
///
/// Config files and environment variables share one parser: names are
/// matched case-insensitively after trimming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum DeployEnv {
    /// The default, non-ephemeral environment.
    #[default]
    Production,
    /// A remote environment that closely matches production.
    Staging,
    /// A remote environment for trying out new features and stress tests.
    Testing,
    /// A remote environment for automated tests run on push.
    Ci,
    /// A local environment for running automated tests before pushing.
    LocalCi,
    /// A local environment for development.
    Local,
}

impl DeployEnv {
    /// Every environment, ordered by numeric value.
    pub const ALL: [DeployEnv; 6] = [
        Self::Production,
        Self::Staging,
        Self::Testing,
        Self::Ci,
        Self::LocalCi,
        Self::Local,
    ];

    /// Stable numeric value.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Production => 0,
            Self::Staging => 10,
            Self::Testing => 20,
            Self::Ci => 30,
            Self::LocalCi => 40,
            Self::Local => 50,
        }
    }

    /// Inverse of [`DeployEnv::as_i32`].
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.as_i32() == value)
    }

    /// Stable lowercase name, as used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Testing => "testing",
            Self::Ci => "ci",
            Self::LocalCi => "local-ci",
            Self::Local => "local",
        }
    }

    /// Whether the process runs on a developer machine.
    pub fn is_local(self) -> bool {
        matches!(self, Self::LocalCi | Self::Local)
    }
}

impl fmt::Display for DeployEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeployEnv {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == needle)
            .ok_or_else(|| crate::ConfigError::InvalidDeployEnv {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for DeployEnv {
    type Error = crate::ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
