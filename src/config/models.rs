//! Configuration data structures for urlshort.
//!
//! These types map directly to TOML (also JSON / YAML) settings files. Every
//! field has a default so an empty file, or no file at all, yields a working
//! server with the built-in static redirects.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ChainBuilder, PathUrlEntry, resolver::DEFAULT_RESPONSE};

/// Log output encoding
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Pretty => f.write_str("pretty"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

/// Top-level server settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub listen_addr: String,
    /// Inline redirects forming the static stage
    pub redirects: Vec<PathUrlEntry>,
    /// Optional YAML redirect file, consulted before the static stage
    pub yaml_file: Option<String>,
    /// Optional JSON redirect file, consulted before the YAML stage
    pub json_file: Option<String>,
    /// Body served when no stage matches
    pub default_response: String,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            redirects: default_redirects(),
            yaml_file: None,
            json_file: None,
            default_response: DEFAULT_RESPONSE.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Chain inputs described by this configuration.
    pub fn chain_builder(&self) -> ChainBuilder {
        ChainBuilder::new()
            .static_entries(self.redirects.iter().cloned())
            .yaml_file(self.yaml_file.as_deref())
            .json_file(self.json_file.as_deref())
            .default_response(self.default_response.clone())
    }
}

fn default_redirects() -> Vec<PathUrlEntry> {
    vec![
        PathUrlEntry::new(
            "/urlshort-godoc",
            "https://godoc.org/github.com/gophercises/urlshort",
        ),
        PathUrlEntry::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.redirects.len(), 2);
        assert!(config.yaml_file.is_none());
        assert!(config.json_file.is_none());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"yaml_file": "r.yaml", "logging": {"format": "pretty"}}"#)
                .unwrap();

        assert_eq!(config.yaml_file.as_deref(), Some("r.yaml"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.redirects.len(), 2);
    }
}
