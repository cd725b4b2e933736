//! Configuration loaded from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `TALLY_LOG` (falls back to `RUST_LOG`) | `info` |
//! | `TALLY_LOG_FORMAT` (`json` or `pretty`) | `json` |

use thiserror::Error;

use tally_observability::{LogConfig, LogFormat};

pub const LOG_FILTER_VAR: &str = "TALLY_LOG";
pub const LOG_FORMAT_VAR: &str = "TALLY_LOG_FORMAT";
const FALLBACK_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Process settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub log: LogConfig,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup (tests, embedding).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut log = LogConfig::default();

        let filter = non_blank(lookup(LOG_FILTER_VAR)).or_else(|| non_blank(lookup(FALLBACK_FILTER_VAR)));
        if let Some(filter) = filter {
            log.filter = filter;
        }

        if let Some(format) = non_blank(lookup(LOG_FORMAT_VAR)) {
            log.format = parse_format(&format)?;
        }

        Ok(Self { log })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::InvalidValue {
            var: LOG_FORMAT_VAR,
            value: value.to_string(),
            reason: "expected `json` or `pretty`",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log.filter, "info");
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn tally_log_takes_precedence_over_rust_log() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("RUST_LOG", "warn"),
            ("TALLY_LOG", "tally_accounting=debug"),
        ]))
        .unwrap();
        assert_eq!(settings.log.filter, "tally_accounting=debug");
    }

    #[test]
    fn rust_log_is_used_when_tally_log_is_blank() {
        let settings =
            Settings::from_lookup(lookup_from(&[("RUST_LOG", "warn"), ("TALLY_LOG", "  ")])).unwrap();
        assert_eq!(settings.log.filter, "warn");
    }

    #[test]
    fn format_is_case_insensitive() {
        let settings = Settings::from_lookup(lookup_from(&[("TALLY_LOG_FORMAT", "Pretty")])).unwrap();
        assert_eq!(settings.log.format, LogFormat::Pretty);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[("TALLY_LOG_FORMAT", "xml")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { var, value, .. } => {
                assert_eq!(var, "TALLY_LOG_FORMAT");
                assert_eq!(value, "xml");
            }
        }
    }

    #[test]
    fn bootstrap_can_run_twice() {
        let settings = Settings::default();
        crate::bootstrap(&settings);
        crate::bootstrap(&settings);
    }
}
