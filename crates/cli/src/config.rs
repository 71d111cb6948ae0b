//! Run configuration from the environment.
//!
//! The economic model is fixed; only how a run is driven can be configured.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use shopsim_observability::{LogFormat, ParseLogFormatError};

pub const ENV_SEED: &str = "SHOPSIM_SEED";
pub const ENV_DECISIONS: &str = "SHOPSIM_DECISIONS";
pub const ENV_LOG_FORMAT: &str = "SHOPSIM_LOG_FORMAT";
pub const ENV_PAUSE: &str = "SHOPSIM_PAUSE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{ENV_SEED} must be an unsigned integer, got `{value}`")]
    InvalidSeed {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{ENV_LOG_FORMAT}: {0}")]
    InvalidLogFormat(#[from] ParseLogFormatError),

    #[error("{name} must be 0/1/true/false, got `{value}`")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Fixed seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Replay decisions from this JSON file instead of prompting.
    pub decisions_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Wait for Enter between days. Defaults to on when prompting, off when replaying.
    pub pause: bool,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let seed = non_empty(ENV_SEED)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidSeed { value, source })
            })
            .transpose()?;

        let decisions_path = non_empty(ENV_DECISIONS).map(PathBuf::from);

        let log_format = non_empty(ENV_LOG_FORMAT)
            .map(|v| v.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        let pause = match non_empty(ENV_PAUSE) {
            Some(value) => parse_flag(ENV_PAUSE, value)?,
            None => decisions_path.is_none(),
        };

        Ok(Self {
            seed,
            decisions_path,
            log_format,
            pause,
        })
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_prompt_interactively_with_pause() {
        let cfg = RunConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.decisions_path, None);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.pause);
    }

    #[test]
    fn replay_defaults_to_no_pause() {
        let cfg = RunConfig::from_lookup(lookup(&[
            (ENV_SEED, " 42 "),
            (ENV_DECISIONS, "plan.json"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.decisions_path, Some(PathBuf::from("plan.json")));
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert!(!cfg.pause);
    }

    #[test]
    fn explicit_pause_wins() {
        let cfg = RunConfig::from_lookup(lookup(&[(ENV_PAUSE, "off")])).unwrap();
        assert!(!cfg.pause);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            RunConfig::from_lookup(lookup(&[(ENV_SEED, "-1")])),
            Err(ConfigError::InvalidSeed { .. })
        ));
        assert!(matches!(
            RunConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])),
            Err(ConfigError::InvalidLogFormat(_))
        ));
        assert!(matches!(
            RunConfig::from_lookup(lookup(&[(ENV_PAUSE, "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
