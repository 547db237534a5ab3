// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sensei.toml` > `~/.config/sensei/sensei.toml` > `/etc/sensei/sensei.toml`
//! with environment variable overrides via `SENSEI_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SenseiConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sensei/sensei.toml` (system-wide)
/// 3. `~/.config/sensei/sensei.toml` (user XDG config)
/// 4. `./sensei.toml` (local directory)
/// 5. `SENSEI_*` environment variables
pub fn load_config() -> Result<SenseiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SenseiConfig::default()))
        .merge(Toml::file("/etc/sensei/sensei.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sensei/sensei.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sensei.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and for callers that carry their own TOML.
pub fn load_config_from_str(toml_content: &str) -> Result<SenseiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SenseiConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SenseiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SenseiConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `SENSEI_DEEPSEEK_API_KEY` must
/// map to `deepseek.api_key`, not `deepseek.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SENSEI_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SENSEI_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("deepseek_", "deepseek.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.deepseek.model, "deepseek-chat");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
port = 9090

[storage]
database_path = "/var/lib/sensei/sensei.db"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.database_path, "/var/lib/sensei/sensei.db");
        // Untouched sections keep their defaults.
        assert_eq!(config.deepseek.base_url, "https://api.deepseek.com");
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "sensei.toml",
                r#"
[deepseek]
model = "deepseek-chat"
"#,
            )?;
            jail.set_env("SENSEI_DEEPSEEK_MODEL", "deepseek-reasoner");
            jail.set_env("SENSEI_DEEPSEEK_API_KEY", "sk-env");

            let config = load_config().expect("config should load");
            assert_eq!(config.deepseek.model, "deepseek-reasoner");
            assert_eq!(config.deepseek.api_key, Some("sk-env".to_string()));
            Ok(())
        });
    }

    #[test]
    fn underscore_keys_map_correctly() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SENSEI_STORAGE_DATABASE_PATH", "/tmp/jail.db");
            jail.set_env("SENSEI_SERVER_LOG_LEVEL", "debug");

            let config = load_config().expect("config should load");
            assert_eq!(config.storage.database_path, "/tmp/jail.db");
            assert_eq!(config.server.log_level, "debug");
            Ok(())
        });
    }
}
