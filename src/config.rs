//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::codec::UnknownSchemaPolicy;
use crate::integrations::TimezoneConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub timezone: TimezoneSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where export files are read from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Export directory; `None` means `~/Dropbox/Apps/Reporter-App`
    pub dir: Option<PathBuf>,
}

/// Encoding behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub unknown_schema: UnknownSchemaPolicy,

    #[serde(default)]
    pub pretty: bool,
}

/// Time zone service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneSettings {
    pub api_key: Option<String>,

    #[serde(default = "default_timezone_endpoint")]
    pub endpoint: String,
}

fn default_timezone_endpoint() -> String {
    TimezoneConfig::default().endpoint
}

impl Default for TimezoneSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_timezone_endpoint(),
        }
    }
}

impl From<&TimezoneSettings> for TimezoneConfig {
    fn from(settings: &TimezoneSettings) -> Self {
        TimezoneConfig {
            api_key: settings.api_key.clone(),
            endpoint: settings.endpoint.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("reporter").join("config.toml")),
            Some(PathBuf::from("./reporter.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("REPORTER_DIR") {
            self.source.dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = var("REPORTER_TIMEZONE_API_KEY") {
            self.timezone.api_key = Some(key);
        }

        if let Some(level) = var("REPORTER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("REPORTER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Reporter Configuration
#
# Environment variables override these settings:
# - REPORTER_DIR
# - REPORTER_TIMEZONE_API_KEY
# - REPORTER_LOG_LEVEL
# - REPORTER_LOG_FORMAT

[source]
# Directory holding YYYY-MM-DD-reporter-export.json files
# (default: ~/Dropbox/Apps/Reporter-App)
# dir = "/path/to/Reporter-App"

[codec]
# How to encode documents whose schema could not be inferred:
# current (write the v2 layout) or reject
unknown_schema = "current"

# Indent re-encoded JSON
pretty = false

[timezone]
# Google Time Zone API key
# api_key = ""

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.source.dir, None);
        assert_eq!(config.codec.unknown_schema, UnknownSchemaPolicy::Current);
        assert!(!config.codec.pretty);
        assert_eq!(config.timezone.api_key, None);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [source]
            dir = "/data/reporter"

            [codec]
            unknown_schema = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.dir, Some(PathBuf::from("/data/reporter")));
        assert_eq!(config.codec.unknown_schema, UnknownSchemaPolicy::Reject);
        assert_eq!(config.logging.level, "warn");
        assert!(config.timezone.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_bad_policy_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reporter.toml");
        std::fs::write(&path, "[codec]\nunknown_schema = \"guess\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("REPORTER_DIR", "/mnt/exports"),
            ("REPORTER_TIMEZONE_API_KEY", "abc123"),
            ("REPORTER_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.dir, Some(PathBuf::from("/mnt/exports")));
        assert_eq!(config.timezone.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");

        let timezone = TimezoneConfig::from(&config.timezone);
        assert_eq!(timezone.api_key.as_deref(), Some("abc123"));
    }
}
