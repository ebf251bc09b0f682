//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hearth.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use hearth_engine::settings::{EngineSettings, TriggerDevicePolicy};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings, passed through as-is.
    pub engine: EngineSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Fixture data settings.
    pub seed: SeedConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Where the store's fixture data comes from.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Path to a JSON seed file. Absent means the built-in demo home.
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from `hearth.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or an
    /// override carries an unknown value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hearth.toml")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("HEARTH_TRIGGER_DEVICE_POLICY") {
            self.engine.trigger_device_policy = match val.as_str() {
                "any_device" => TriggerDevicePolicy::AnyDevice,
                "sensors_only" => TriggerDevicePolicy::SensorsOnly,
                other => {
                    return Err(ConfigError::Validation(format!(
                        "unknown trigger device policy `{other}`"
                    )))
                }
            };
        }
        if let Ok(val) = std::env::var("HEARTH_SEED") {
            self.seed.path = Some(val);
        }
        if let Ok(val) = std::env::var("HEARTH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hearthd=info,hearth_engine=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(
            config.engine.trigger_device_policy,
            TriggerDevicePolicy::AnyDevice
        );
        assert!(config.seed.path.is_none());
        assert_eq!(config.logging.filter, "hearthd=info,hearth_engine=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(
            config.engine.trigger_device_policy,
            TriggerDevicePolicy::AnyDevice
        );
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [engine]
            trigger_device_policy = 'sensors_only'

            [logging]
            filter = 'debug'

            [seed]
            path = 'fixtures/home.json'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.engine.trigger_device_policy,
            TriggerDevicePolicy::SensorsOnly
        );
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.seed.path.as_deref(), Some("fixtures/home.json"));
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [logging]
            filter = 'trace'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "trace");
        assert_eq!(
            config.engine.trigger_device_policy,
            TriggerDevicePolicy::AnyDevice
        );
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
