// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-scoped runtime information.
//!
//! Build information and the deployment environment are resolved once at
//! startup from a [`RuntimeConfig`] and installed with
//! [`Runtime::install`]. After that they are read-only.
//!
//! ```no_run
//! use klib_runtime::{Runtime, init_tracing, load_config};
//!
//! let config = load_config(None)?;
//! init_tracing(&config);
//! let runtime = Runtime::install(&config)?;
//! println!("{} ({})", runtime.build_info(), runtime.deploy_env());
//! # Ok::<(), klib_runtime::ConfigError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod build_info;
mod config;
mod deploy_env;
mod telemetry;

pub use build_info::BuildInfo;
pub use config::{
    ConfigError, ENV_BUILD_INFO, ENV_DEPLOY_ENV, ENV_LOG_LEVEL, RuntimeConfig, apply_env_overrides,
    apply_overrides, load_config, parse_toml, validate_config,
};
pub use deploy_env::DeployEnv;
pub use telemetry::{DEFAULT_FILTER, env_filter, init_tracing};

use std::sync::OnceLock;
use tracing::info;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Resolved runtime information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    deploy_env: DeployEnv,
    build_info: BuildInfo,
}

impl Runtime {
    /// Resolve runtime information without installing it.
    ///
    /// `config.build_info` wins over the compile-time value.
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let build_info = config
            .build_info
            .clone()
            .map_or_else(BuildInfo::from_env, BuildInfo::new);
        Self {
            deploy_env: config.deploy_env,
            build_info,
        }
    }

    /// Resolve and install the process-wide runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInstalled`] if a runtime was installed
    /// before; the existing one is left untouched.
    pub fn install(config: &RuntimeConfig) -> Result<&'static Runtime, ConfigError> {
        let mut installed = false;
        let runtime = RUNTIME.get_or_init(|| {
            installed = true;
            Self::from_config(config)
        });
        if !installed {
            return Err(ConfigError::AlreadyInstalled);
        }
        info!(
            target: "klib.runtime",
            deploy_env = %runtime.deploy_env,
            build_info = %runtime.build_info,
            "runtime installed"
        );
        Ok(runtime)
    }

    /// Where the process is deployed.
    pub fn deploy_env(&self) -> DeployEnv {
        self.deploy_env
    }

    /// Build information.
    pub fn build_info(&self) -> &BuildInfo {
        &self.build_info
    }
}

/// The installed runtime, if any.
pub fn current() -> Option<&'static Runtime> {
    RUNTIME.get()
}

/// Installed build information, or `""` before [`Runtime::install`].
pub fn build_info() -> &'static str {
    current().map_or("", |rt| rt.build_info.as_str())
}
