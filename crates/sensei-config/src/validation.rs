// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, known log levels, and well-formed origins.

use crate::diagnostic::ConfigError;
use crate::model::SenseiConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SenseiConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let addr = config.server.host.trim();
        // Accept valid IPv4, IPv6, or hostname patterns
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate port is non-zero
    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    // Validate log_level is a known level
    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` is not one of trace, debug, info, warn, error",
                config.server.log_level
            ),
        });
    }

    // Validate CORS origins carry a scheme
    for (i, origin) in config.server.allowed_origins.iter().enumerate() {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!(
                    "server.allowed_origins[{i}] `{origin}` must start with http:// or https://"
                ),
            });
        }
    }

    // Validate base_url carries a scheme
    if !config.deepseek.base_url.starts_with("http://")
        && !config.deepseek.base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "deepseek.base_url `{}` must start with http:// or https://",
                config.deepseek.base_url
            ),
        });
    }

    // Validate model is not empty
    if config.deepseek.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "deepseek.model must not be empty".to_string(),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SenseiConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SenseiConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut config = SenseiConfig::default();
        config.server.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("server.port"))));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SenseiConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn schemeless_origin_fails_validation() {
        let mut config = SenseiConfig::default();
        config.server.allowed_origins = vec!["localhost:3000".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("allowed_origins"))));
    }

    #[test]
    fn schemeless_base_url_fails_validation() {
        let mut config = SenseiConfig::default();
        config.deepseek.base_url = "api.deepseek.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = SenseiConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.allowed_origins = vec![
            "http://localhost:3000".to_string(),
            "https://sensei.example.com".to_string(),
        ];
        config.storage.database_path = "/tmp/test.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
