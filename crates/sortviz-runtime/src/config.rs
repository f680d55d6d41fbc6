#![forbid(unsafe_code)]

//! Replay configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```toml
//! tick_interval_ms = 500
//! restart_policy = "reuse_submitted"
//! seed = 42
//!
//! [limits]
//! max_len = 12
//! ```
//!
//! Loaders validate after parsing; [`ReplayConfig::validate`] reports every
//! problem at once.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortviz_core::{ArrayLimits, RandomArraySpec};

use crate::session::RestartPolicy;

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Settings for a [`ReplayController`](crate::ReplayController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Delay between revealed steps.
    pub tick_interval_ms: u64,
    pub restart_policy: RestartPolicy,
    /// Length of randomly drawn arrays.
    pub random_len: usize,
    /// Inclusive lower bound for random values.
    pub random_min: i32,
    /// Exclusive upper bound for random values.
    pub random_max: i32,
    /// Keep per-step narration text in generated traces.
    pub narration: bool,
    /// Seed for random arrays; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Check submitted arrays against `limits`.
    pub enforce_limits: bool,
    pub limits: ArrayLimits,
    /// Entries kept in the diagnostic log.
    pub diagnostics_capacity: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
            restart_policy: RestartPolicy::Randomize,
            random_len: 10,
            random_min: 1,
            random_max: 100,
            narration: true,
            seed: None,
            enforce_limits: true,
            limits: ArrayLimits::default(),
            diagnostics_capacity: 500,
        }
    }
}

impl ReplayConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, choosing the format by extension (`.json` or TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// All out-of-range settings. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tick_interval_ms == 0 {
            errors.push("tick_interval_ms must be > 0".into());
        }
        if self.random_len == 0 {
            errors.push("random_len must be > 0".into());
        }
        if self.random_min >= self.random_max {
            errors.push(format!(
                "random_min must be < random_max, got {} >= {}",
                self.random_min, self.random_max
            ));
        }
        if self.diagnostics_capacity == 0 {
            errors.push("diagnostics_capacity must be > 0".into());
        }
        if self.limits.min_len > self.limits.max_len {
            errors.push(format!(
                "limits.min_len must be <= limits.max_len, got {} > {}",
                self.limits.min_len, self.limits.max_len
            ));
        }
        if self.limits.min_value > self.limits.max_value {
            errors.push(format!(
                "limits.min_value must be <= limits.max_value, got {} > {}",
                self.limits.min_value, self.limits.max_value
            ));
        }

        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Shape of arrays drawn for start/restart.
    #[must_use]
    pub fn random_spec(&self) -> RandomArraySpec {
        RandomArraySpec {
            len: self.random_len,
            values: self.random_min..self.random_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ReplayConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.tick_interval(), Duration::from_millis(1500));
        assert_eq!(config.random_spec(), RandomArraySpec::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ReplayConfig::from_toml_str(
            r#"
            tick_interval_ms = 250
            restart_policy = "reuse_submitted"

            [limits]
            max_len = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.restart_policy, RestartPolicy::ReuseSubmitted);
        assert_eq!(config.limits.max_len, 12);
        assert_eq!(config.limits.min_len, 5);
        assert_eq!(config.random_len, 10);
        assert!(config.narration);
    }

    #[test]
    fn json_round_trips() {
        let mut config = ReplayConfig::default();
        config.seed = Some(7);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ReplayConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = ReplayConfig {
            tick_interval_ms: 0,
            random_min: 50,
            random_max: 10,
            ..ReplayConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("tick_interval_ms")));
        assert!(errors.iter().any(|e| e.contains("random_min")));
    }

    #[test]
    fn loader_rejects_invalid_values() {
        let err = ReplayConfig::from_toml_str("random_len = 0").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert!(errors[0].contains("random_len")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn loader_rejects_malformed_toml() {
        assert!(matches!(
            ReplayConfig::from_toml_str("tick_interval_ms = ["),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn loads_files_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("replay.toml");
        let mut f = std::fs::File::create(&toml_path).unwrap();
        writeln!(f, "seed = 3").unwrap();
        assert_eq!(ReplayConfig::from_file(&toml_path).unwrap().seed, Some(3));

        let json_path = dir.path().join("replay.json");
        std::fs::write(&json_path, r#"{"narration": false}"#).unwrap();
        assert!(!ReplayConfig::from_file(&json_path).unwrap().narration);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ReplayConfig::from_toml_file(dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
