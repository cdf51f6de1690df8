#![allow(clippy::collapsible_if)]

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::models::ServerConfig;

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid listen address '{address}': {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Server configuration validator
///
/// Redirect destinations are not checked; any string is accepted as a
/// `Location`.
pub struct ServerConfigValidator;

impl ServerConfigValidator {
    /// Validate the entire server configuration
    pub fn validate(config: &ServerConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_listen_address(&config.listen_addr) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_log_level(&config.logging.level) {
            errors.push(e);
        }

        for (field, value) in [
            ("yaml_file", &config.yaml_file),
            ("json_file", &config.json_file),
        ] {
            if let Some(path) = value {
                if let Err(e) = Self::validate_file_path(field, path) {
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    /// Validate listen address format
    fn validate_listen_address(address: &str) -> ValidationResult<()> {
        if address.parse::<SocketAddr>().is_err() {
            return Err(ValidationError::InvalidListenAddress {
                address: address.to_string(),
                reason: "Must be in format 'IP:PORT' (e.g., '127.0.0.1:3000' or '0.0.0.0:8080')"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn validate_log_level(level: &str) -> ValidationResult<()> {
        EnvFilter::try_new(level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: e.to_string(),
            })
    }

    fn validate_file_path(field: &str, path: &str) -> ValidationResult<()> {
        if path.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: field.to_string(),
                message: "File path must not be empty; omit the key to disable the stage"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        if errors.is_empty() {
            return "No errors".to_string();
        }

        if errors.len() == 1 {
            return errors[0].to_string();
        }

        let mut message = format!("Found {} validation errors:\n", errors.len());
        for (i, error) in errors.iter().enumerate() {
            message.push_str(&format!("  {}. {}\n", i + 1, error));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfigValidator::validate(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_listen_address() {
        let config = ServerConfig {
            listen_addr: ":8080".to_string(),
            ..ServerConfig::default()
        };

        let err = ServerConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains(":8080"));
    }

    #[test]
    fn test_empty_file_path() {
        let config = ServerConfig {
            yaml_file: Some("  ".to_string()),
            ..ServerConfig::default()
        };

        let err = ServerConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("yaml_file"));
    }

    #[test]
    fn test_multiple_errors_are_listed() {
        let config = ServerConfig {
            listen_addr: "nope".to_string(),
            json_file: Some(String::new()),
            ..ServerConfig::default()
        };

        let err = ServerConfigValidator::validate(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Found 2 validation errors"));
        assert!(message.contains("json_file"));
    }

    #[test]
    fn test_redirect_targets_are_not_validated() {
        let config = ServerConfig {
            redirects: vec![crate::core::PathUrlEntry::new("/x", "not a url at all")],
            ..ServerConfig::default()
        };
        assert!(ServerConfigValidator::validate(&config).is_ok());
    }
}
