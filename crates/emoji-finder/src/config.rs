//! Finder configuration
//!
//! Every section falls back to its defaults, so an empty TOML file is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub render: RenderConfig,
    pub notifications: NotificationConfig,
    pub navigation: NavigationConfig,
}

/// Incremental renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Entries attached per frame
    pub batch_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Copy notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays on the page
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 1000 }
    }
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Page location settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// URL the page is considered loaded from (its hash seeds the search)
    pub page_url: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { page_url: "https://emoji.local/".to_string() }
    }
}

impl FinderConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.batch_size == 0 {
            return Err(ConfigError::Invalid("render.batch_size must be at least 1".to_string()));
        }
        url::Url::parse(&self.navigation.page_url)
            .map_err(|e| ConfigError::Invalid(format!("navigation.page_url: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FinderConfig::from_toml_str("").unwrap();
        assert_eq!(config.render.batch_size, 100);
        assert_eq!(config.notifications.duration(), Duration::from_millis(1000));
        assert_eq!(config, FinderConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = FinderConfig::from_toml_str("[render]\nbatch_size = 25\n").unwrap();
        assert_eq!(config.render.batch_size, 25);
        assert_eq!(config.notifications.duration_ms, 1000);
    }

    #[test]
    fn test_rejects_zero_batch() {
        let err = FinderConfig::from_toml_str("[render]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = FinderConfig::from_toml_str("[navigation]\npage_url = \"not a url\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finder.toml");
        std::fs::write(&path, "[notifications]\nduration_ms = 250\n").unwrap();

        let config = FinderConfig::load(&path).unwrap();
        assert_eq!(config.notifications.duration_ms, 250);
        assert!(matches!(FinderConfig::load(&dir.path().join("nope.toml")), Err(ConfigError::Io { .. })));
    }
}
