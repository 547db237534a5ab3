// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sensei service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sensei configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SenseiConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// DeepSeek API settings.
    #[serde(default)]
    pub deepseek: DeepSeekConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed by CORS. An empty list permits any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// DeepSeek API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeepSeekConfig {
    /// DeepSeek API key. `None` leaves the diagnosis endpoint disabled.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier to request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Deterministic sampling seed sent with every request.
    #[serde(default)]
    pub seed: i64,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            seed: 0,
        }
    }
}

fn default_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "sensei.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SenseiConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.deepseek.api_key, None);
        assert_eq!(config.deepseek.base_url, "https://api.deepseek.com");
        assert_eq!(config.deepseek.model, "deepseek-chat");
        assert_eq!(config.deepseek.seed, 0);
        assert_eq!(config.storage.database_path, "sensei.db");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[deepseek]
api_key = "sk-test"
"#;
        let config: SenseiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.deepseek.api_key, Some("sk-test".to_string()));
        assert_eq!(config.deepseek.model, "deepseek-chat");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[server]
prot = 9000
"#;
        let result = toml::from_str::<SenseiConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn allowed_origins_deserialize() {
        let toml_str = r#"
[server]
allowed_origins = ["https://code.example.org", "http://localhost:3000"]
"#;
        let config: SenseiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.server.allowed_origins[0], "https://code.example.org");
    }
}
