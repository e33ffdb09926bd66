//! Catalog configuration.
//!
//! Values are layered: explicit overrides (CLI flags) win over environment
//! variables, which win over the JSON config file, which wins over defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{normalize_base_url, normalize_text_option};

pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
pub const ENV_OVERLAY_PATH: &str = "SHOPFRONT_OVERLAY_PATH";
pub const ENV_TIMEOUT_SECS: &str = "SHOPFRONT_TIMEOUT_SECS";

const APP_DIR_NAME: &str = "shopfront";
const CONFIG_FILE_NAME: &str = "config.json";
const OVERLAY_FILE_NAME: &str = "managed-products.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Remote catalog base URL
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Overlay JSON file location
    #[serde(default)]
    pub overlay_path: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl CatalogConfig {
    /// `<config dir>/shopfront/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// `<data dir>/shopfront/managed-products.json`
    pub fn default_overlay_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(OVERLAY_FILE_NAME))
    }

    /// Load the config file, treating a missing file as empty.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::InvalidInput(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = normalize_text_option(lookup(ENV_TIMEOUT_SECS)).and_then(|raw| {
            raw.parse::<u64>()
                .inspect_err(|error| {
                    tracing::warn!("Ignoring invalid {}={}: {}", ENV_TIMEOUT_SECS, raw, error);
                })
                .ok()
        });

        self.merge(Self {
            api_base_url: normalize_text_option(lookup(ENV_API_URL)),
            overlay_path: normalize_text_option(lookup(ENV_OVERLAY_PATH)).map(PathBuf::from),
            request_timeout_secs: timeout,
        })
    }

    /// Overlay every value set in `overrides` on top of `self`.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            api_base_url: normalize_text_option(overrides.api_base_url)
                .or_else(|| normalize_text_option(self.api_base_url)),
            overlay_path: overrides.overlay_path.or(self.overlay_path),
            request_timeout_secs: overrides.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    /// Normalized catalog base URL.
    pub fn api_base_url(&self) -> Result<String> {
        let raw = self
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL);
        normalize_base_url(raw).ok_or_else(|| {
            Error::InvalidInput(format!(
                "api_base_url must include http:// or https:// (got '{}')",
                raw.trim()
            ))
        })
    }

    pub fn overlay_path(&self) -> Result<PathBuf> {
        self.overlay_path
            .clone()
            .or_else(Self::default_overlay_path)
            .ok_or_else(|| {
                Error::InvalidInput(
                    "Could not resolve a data directory; set overlay_path explicitly".to_string(),
                )
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_catalog() {
        let config = CatalogConfig::default();
        assert_eq!(config.api_base_url().unwrap(), "https://fakestoreapi.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn api_base_url_requires_scheme() {
        let config = CatalogConfig {
            api_base_url: Some("fakestoreapi.com".to_string()),
            ..CatalogConfig::default()
        };
        assert!(config.api_base_url().is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let file = CatalogConfig {
            api_base_url: Some("https://file.example.com".to_string()),
            overlay_path: Some(PathBuf::from("/tmp/file.json")),
            request_timeout_secs: Some(3),
        };

        let config = file.with_env_overrides(env(&[
            (ENV_API_URL, " https://env.example.com/ "),
            (ENV_TIMEOUT_SECS, "not-a-number"),
        ]));

        assert_eq!(config.api_base_url().unwrap(), "https://env.example.com");
        assert_eq!(config.overlay_path().unwrap(), PathBuf::from("/tmp/file.json"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let base = CatalogConfig {
            api_base_url: Some("https://kept.example.com".to_string()),
            ..CatalogConfig::default()
        };
        let merged = base.merge(CatalogConfig {
            api_base_url: Some("   ".to_string()),
            ..CatalogConfig::default()
        });
        assert_eq!(merged.api_base_url.as_deref(), Some("https://kept.example.com"));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = CatalogConfig {
            request_timeout_secs: Some(0),
            ..CatalogConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn load_from_path_handles_missing_and_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(
            CatalogConfig::load_from_path(&path).unwrap(),
            CatalogConfig::default()
        );

        std::fs::write(&path, r#"{"api_base_url":"https://x.example.com","extra":1}"#).unwrap();
        let error = CatalogConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));

        std::fs::write(
            &path,
            r#"{"api_base_url":"https://x.example.com","request_timeout_secs":4}"#,
        )
        .unwrap();
        let config = CatalogConfig::load_from_path(&path).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(4));
    }
}
