//! CLI configuration file
//!
//! Values from the YAML file act as defaults; command-line flags win.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Serialization format for parsed orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Settings for the `parse` command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Output format (default: json)
    pub format: OutputFormat,
    /// Indent JSON output (default: true)
    pub pretty: bool,
    /// Skip documents that fail to parse instead of aborting (default: false)
    pub keep_going: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            keep_going: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from YAML text; an empty document yields the defaults
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable indented output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable skipping of failed documents
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.pretty);
        assert!(!config.keep_going);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CliConfig::from_yaml("format: yaml\n").unwrap();
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(config.pretty);
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(CliConfig::from_yaml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CliConfig::from_yaml("color: neon\n").is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CliConfig::default()
            .with_format(OutputFormat::Yaml)
            .with_pretty(false)
            .with_keep_going(true);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(!config.pretty);
        assert!(config.keep_going);
    }
}
