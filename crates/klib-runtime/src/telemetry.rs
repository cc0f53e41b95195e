// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing_subscriber::EnvFilter;

use crate::RuntimeConfig;

/// Filter used when the configuration names no level.
pub const DEFAULT_FILTER: &str = "info";

/// Build the `EnvFilter` for a configuration.
///
/// Invalid directives fall back to [`DEFAULT_FILTER`].
pub fn env_filter(config: &RuntimeConfig) -> EnvFilter {
    let directive = config.log_level.as_deref().unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber filtered by the configured level.
///
/// Returns `false` if a global subscriber was already set, in which case
/// nothing changes.
pub fn init_tracing(config: &RuntimeConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn filter_uses_configured_level() {
        let cfg = RuntimeConfig {
            log_level: Some("klib=trace".into()),
            ..RuntimeConfig::default()
        };
        assert_eq!(env_filter(&cfg).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn filter_defaults_when_unset() {
        let cfg = RuntimeConfig {
            log_level: None,
            ..RuntimeConfig::default()
        };
        assert_eq!(env_filter(&cfg).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn invalid_directive_falls_back() {
        let cfg = RuntimeConfig {
            log_level: Some("klib=[".into()),
            ..RuntimeConfig::default()
        };
        assert_eq!(env_filter(&cfg).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn second_init_is_a_no_op() {
        let cfg = RuntimeConfig::default();
        let _ = init_tracing(&cfg);
        assert!(!init_tracing(&cfg));
    }
}
