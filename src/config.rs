//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ImageError;

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "IMAGEGEN_BASE_URL";
/// Environment variable overriding the service access key.
pub const API_KEY_ENV: &str = "IMAGEGEN_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Generation service settings.
    #[serde(default)]
    pub service: ServiceSection,

    /// Default values for CLI options.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// The `[service]` table as written in the config file.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceSection {
    /// Base location of the hosted functions, e.g. `https://abc.supabase.co`.
    pub base_url: Option<String>,
    /// Access credential sent as a bearer token.
    pub api_key: Option<String>,
}

/// Default option values from the config file.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from(".") }
    }
}

/// Fully resolved settings needed to reach the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base location of the service.
    pub base_url: String,
    /// Access credential.
    pub api_key: String,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the service base URL, preferring the environment variable.
    #[must_use]
    pub fn base_url(&self) -> Option<String> {
        non_empty_env(BASE_URL_ENV).or_else(|| self.service.base_url.clone())
    }

    /// Get the service access key, preferring the environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        non_empty_env(API_KEY_ENV).or_else(|| self.service.api_key.clone())
    }

    /// Resolve both service settings.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::MissingConfig`] naming the first absent value.
    pub fn service(&self) -> Result<ServiceConfig, ImageError> {
        let base_url = self.base_url().ok_or_else(|| ImageError::MissingConfig {
            field: "base_url".into(),
            env_var: BASE_URL_ENV.into(),
        })?;
        let api_key = self.api_key().ok_or_else(|| ImageError::MissingConfig {
            field: "api_key".into(),
            env_var: API_KEY_ENV.into(),
        })?;
        Ok(ServiceConfig { base_url, api_key })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `IMAGEGEN_CONFIG` environment variable
/// 3. `~/.config/imagegen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("IMAGEGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/imagegen/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/imagegen/config.toml")
    } else {
        PathBuf::from("imagegen.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.service.base_url.is_none());
        assert!(config.service.api_key.is_none());
        assert_eq!(config.defaults.output_dir, PathBuf::from("."));
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.defaults.output_dir, PathBuf::from("."));
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("imagegen_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[service]
base_url = "https://demo.supabase.co"
api_key = "anon-key"

[defaults]
output_dir = "/tmp/pictures"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.service.base_url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.service.api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.defaults.output_dir, PathBuf::from("/tmp/pictures"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("imagegen_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_base_url_is_reported_first() {
        let config = Config {
            service: ServiceSection { base_url: None, api_key: Some("k".into()) },
            ..Config::default()
        };

        std::env::remove_var(BASE_URL_ENV);
        match config.service() {
            Err(ImageError::MissingConfig { field, env_var }) => {
                assert_eq!(field, "base_url");
                assert_eq!(env_var, BASE_URL_ENV);
            }
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
