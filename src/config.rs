// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// The settings store and theme options consumed by the public dispatcher.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_show_site_name")]
    pub show_site_name: bool,
    #[serde(default)]
    pub site_title: Option<String>,
    #[serde(default)]
    pub seo_title: Option<String>,
    /// Identifier of the page rendered at `/` instead of the index view.
    #[serde(default)]
    pub homepage_id: Option<u64>,
    /// Overrides the request-derived base URL in robots.txt and the sitemap.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_show_site_name() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            show_site_name: default_show_site_name(),
            site_title: None,
            seo_title: None,
            homepage_id: None,
            base_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContentConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    pub content: ContentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration that passed structural validation. Shared read-only for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|error| {
            ConfigError::LoadError(format!("cannot read {}: {}", path.display(), error))
        })?;
        toml::from_str(&text).map_err(|error| {
            ConfigError::LoadError(format!("cannot parse {}: {}", path.display(), error))
        })
    }

    pub fn validate(mut self) -> Result<ValidatedConfig, ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.bind_address must not be empty".to_string(),
            ));
        }

        if let Some(base_url) = &mut self.site.base_url {
            let trimmed = base_url.trim().trim_end_matches('/').to_string();
            if trimmed.is_empty() {
                return Err(ConfigError::ValidationError(
                    "site.base_url must not be empty when set".to_string(),
                ));
            }
            *base_url = trimmed;
        }

        if !self.site.show_site_name
            && self.site.site_title.is_none()
            && self.site.seo_title.is_none()
        {
            warn!("site.show_site_name is disabled but no site_title/seo_title is configured");
        }

        Ok(ValidatedConfig {
            app: self.app,
            server: self.server,
            site: self.site,
            content: self.content,
            logging: self.logging,
        })
    }
}

/// Load and validate a configuration file in one step.
pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    Config::load(path)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [app]
        name = "Portico Test"

        [server]
        port = 8080

        [content]
        path = "content.toml"
    "#;

    fn parse(text: &str) -> Config {
        toml::from_str(text).expect("parse config")
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse(MINIMAL).validate().expect("validate");
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert!(config.site.show_site_name);
        assert!(config.site.homepage_id.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_zero_port() {
        let text = MINIMAL.replace("port = 8080", "port = 0");
        let result = parse(&text).validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_empty_app_name() {
        let text = MINIMAL.replace("Portico Test", "  ");
        let result = parse(&text).validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn normalizes_base_url_trailing_slash() {
        let text = format!("{}\n[site]\nbase_url = \"https://example.com/\"\n", MINIMAL);
        let config = parse(&text).validate().expect("validate");
        assert_eq!(config.site.base_url.as_deref(), Some("https://example.com"));
    }
}
