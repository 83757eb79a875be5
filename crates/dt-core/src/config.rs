//! Configuration management for datathread

use crate::error::{DataThreadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment settings
    pub comments: CommentsConfig,
    /// Render settings
    pub render: RenderConfig,
    /// Activity search settings
    pub activity: ActivityConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DataThreadError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Comment-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Maximum comment length in characters
    pub max_comment_length: usize,
    /// Whether reactions can be added
    pub allow_reactions: bool,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            max_comment_length: 10000,
            allow_reactions: true,
        }
    }
}

/// Render-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default output format
    pub default_format: String,
    /// Base URL that hashtag links point under
    pub tag_base_url: String,
    /// Open URL links in a new tab
    pub link_target_blank: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            tag_base_url: "/-/datasette-comments/tags".to_string(),
            link_target_blank: true,
        }
    }
}

/// Activity search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Maximum number of results
    pub default_limit: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { default_limit: 100 }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the data directory
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.comments.max_comment_length, 10000);
        assert_eq!(config.render.default_format, "html");
        assert_eq!(config.activity.default_limit, 100);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[comments]"));
        assert!(toml.contains("[render]"));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(
            config.render.tag_base_url,
            config2.render.tag_base_url
        );
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[activity]\ndefault_limit = 5\n").unwrap();
        assert_eq!(config.activity.default_limit, 5);
        assert_eq!(config.comments.max_comment_length, 10000);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.render.default_format = "markdown".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.render.default_format, "markdown");
    }

    #[test]
    fn test_load_or_default_missing() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_or_default(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(config.activity.default_limit, 100);
    }

    #[test]
    fn test_load_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "comments = 3").unwrap();
        assert!(matches!(Config::load(&path), Err(DataThreadError::Toml(_))));
    }
}
