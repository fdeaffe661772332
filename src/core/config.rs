use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::utils::safe_truncate_ellipsis;
use crate::{DEFAULT_LOG_FILTER, DEFAULT_MAX_CAUSE_CHARS, DEFAULT_PROGRESS_INTERVAL};


pub const ENV_PREFIX: &str = "BATCHSTATS";


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Log a progress line every N items. Zero disables progress lines.
    pub progress_interval: usize,
    /// Rendered failure causes are truncated past this many characters. Zero keeps them whole.
    pub max_cause_chars: usize,
    pub log_filter: String,
}

impl BatchConfig {

    pub fn new(progress_interval: usize, max_cause_chars: usize) -> Self {
        Self {
            progress_interval,
            max_cause_chars,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Defaults layered with `BATCHSTATS_*` environment variables,
    /// e.g. `BATCHSTATS_PROGRESS_INTERVAL=10`.
    pub fn from_env() -> Result<Self> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("progress_interval", defaults.progress_interval as u64)?
            .set_default("max_cause_chars", defaults.max_cause_chars as u64)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }


    pub fn should_log_progress(&self, processed: usize) -> bool {
        self.progress_interval > 0 && processed > 0 && processed % self.progress_interval == 0
    }


    pub fn render_cause(&self, cause: &str) -> String {
        if self.max_cause_chars == 0 {
            cause.to_string()
        } else {
            safe_truncate_ellipsis(cause, self.max_cause_chars)
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_INTERVAL, DEFAULT_MAX_CAUSE_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_defaults_without_env() {
        let config = BatchConfig::from_source(env_from(&[])).unwrap();
        assert_eq!(config, BatchConfig::default());
        assert_eq!(config.progress_interval, 50);
        assert_eq!(config.max_cause_chars, 500);
        assert_eq!(config.log_filter, "batchstats=info");
    }

    #[test]
    fn test_env_overrides() {
        let config = BatchConfig::from_source(env_from(&[
            ("BATCHSTATS_PROGRESS_INTERVAL", "10"),
            ("BATCHSTATS_MAX_CAUSE_CHARS", "32"),
        ]))
        .unwrap();

        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.max_cause_chars, 32);
        assert_eq!(config.log_filter, "batchstats=info");
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let result = BatchConfig::from_source(env_from(&[(
            "BATCHSTATS_PROGRESS_INTERVAL",
            "often",
        )]));
        assert!(matches!(
            result,
            Err(crate::core::error::BatchStatsError::Config(_))
        ));
    }

    #[test]
    fn test_render_cause() {
        let config = BatchConfig::new(0, 9);
        assert_eq!(config.render_cause("not found"), "not found");
        assert_eq!(config.render_cause("connection reset"), "connectio...");

        let unlimited = BatchConfig::from_source(env_from(&[("BATCHSTATS_MAX_CAUSE_CHARS", "0")]))
            .unwrap();
        assert_eq!(unlimited.max_cause_chars, 0);
        assert_eq!(unlimited.render_cause("not found"), "not found");
    }

    #[test]
    fn test_should_log_progress() {
        let config = BatchConfig::new(2, 100);
        assert!(!config.should_log_progress(0));
        assert!(!config.should_log_progress(1));
        assert!(config.should_log_progress(2));
        assert!(config.should_log_progress(4));

        let disabled = BatchConfig::new(0, 100);
        assert!(!disabled.should_log_progress(10));
    }
}
