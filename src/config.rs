use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{LocaleDefaults, MediaItem, TMDB_BASE_URL, TMDB_IMAGE_BASE};

/// Environment variable holding the path of the optional config file
pub const CONFIG_PATH_ENV: &str = "GOODKRAKEN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "goodkraken.toml";
const ENV_PREFIX: &str = "GOODKRAKEN";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub ratings: RatingsConfig,
    pub locale: LocaleDefaults,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Primary metadata catalog (TMDB)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bearer token; every detail and search call fails without it
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poster of `item` at `size` (e.g. `w185`) on the configured image host
    #[must_use]
    pub fn poster_url(&self, item: &MediaItem, size: &str) -> Option<String> {
        item.poster_url(self.image_base_url.trim_end_matches('/'), size)
    }
}

/// Secondary ratings API; link enrichment is off unless both fields are set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingsConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: 10,
        }
    }
}

impl RatingsConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Also write a daily rolling log file into this directory
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional config file, then `GOODKRAKEN__*` variables.
    ///
    /// `TMDB_API_KEY` and `RATINGS_API_KEY` are honoured as well.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

        let mut builder = config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            builder = builder.set_override("catalog.api_key", key)?;
        }
        if let Ok(key) = std::env::var("RATINGS_API_KEY") {
            builder = builder.set_override("ratings.api_key", key)?;
        }

        let config: Self = builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("invalid configuration")?;

        Ok(config.normalized())
    }

    /// Treat blank credentials as absent
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.catalog.api_key = self.catalog.api_key.filter(|k| !k.trim().is_empty());
        self.ratings.api_key = self.ratings.api_key.filter(|k| !k.trim().is_empty());
        self.ratings.base_url = self.ratings.base_url.filter(|u| !u.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.locale.default_locale, "it-IT");
        assert_eq!(config.locale.default_region, "IT");
        assert_eq!(config.catalog.base_url, TMDB_BASE_URL);
        assert!(config.catalog.api_key.is_none());
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml_source(
            r#"
            [server]
            port = 8080

            [catalog]
            api_key = "token"

            [log]
            format = "json"
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.catalog.api_key.as_deref(), Some("token"));
        assert_eq!(config.catalog.timeout_secs, 30);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let mut config = AppConfig::default();
        config.catalog.api_key = Some("   ".to_string());
        config.ratings.api_key = Some(String::new());
        config.ratings.base_url = Some("https://ratings.test".to_string());

        let config = config.normalized();
        assert!(config.catalog.api_key.is_none());
        assert!(config.ratings.api_key.is_none());
        assert!(config.ratings.base_url.is_some());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 4000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_poster_url_uses_configured_image_host() {
        let item: MediaItem = serde_json::from_value(serde_json::json!({
            "id": 438631,
            "title": "Dune",
            "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        }))
        .unwrap();

        let config = toml_source(
            r#"
            [catalog]
            image_base_url = "https://images.example.org/t/p/"
            "#,
        );
        assert_eq!(
            config.catalog.poster_url(&item, "w185").as_deref(),
            Some("https://images.example.org/t/p/w185/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );

        let no_poster = MediaItem {
            poster_path: None,
            ..item
        };
        assert!(config.catalog.poster_url(&no_poster, "w185").is_none());
    }

    fn toml_source(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
