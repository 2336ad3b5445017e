//! Configuration settings for clipstore.
//!
//! Settings are loaded from `clipstore.yaml` in the working directory, or
//! from the file named by `--config`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::ClipstoreError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Storage settings.
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to `colored`'s global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. Relative paths are resolved against the working directory.
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Create the database's parent directory when it is missing.
    #[serde(default)]
    pub create_parent_dirs: bool,
    /// How long to wait on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Create the `entries` table on open when it is missing.
    #[serde(default = "default_true")]
    pub auto_init: bool,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: None,
            create_parent_dirs: false,
            busy_timeout_ms: default_busy_timeout_ms(),
            auto_init: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, ClipstoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClipstoreError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            ClipstoreError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Load configuration from a file the user named explicitly.
    ///
    /// Unlike [`Config::load_from_path`], a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_required(path: &Path) -> Result<Self, ClipstoreError> {
        if !path.exists() {
            return Err(ClipstoreError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Self::load_from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.storage.database, None);
        assert!(!config.storage.create_parent_dirs);
        assert_eq!(config.storage.busy_timeout_ms, 5000);
        assert!(config.storage.auto_init);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("clipstore.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_load_required_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nope.yaml");

        assert!(matches!(
            Config::load_required(&config_path),
            Err(ClipstoreError::Config(_))
        ));
    }

    #[test]
    fn test_load_storage_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("clipstore.yaml");
        std::fs::write(
            &config_path,
            "storage:\n  database: data/clips.db\n  busy_timeout_ms: 250\n  auto_init: false\n",
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.storage.database, Some(PathBuf::from("data/clips.db")));
        assert_eq!(loaded.storage.busy_timeout_ms, 250);
        assert!(!loaded.storage.auto_init);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("clipstore.yaml");

        let partial_yaml = r"
general:
  default_output: json
storage:
  create_parent_dirs: true
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert!(config.storage.create_parent_dirs);
        // Defaults should be used for missing fields
        assert!(config.storage.auto_init);
        assert_eq!(config.storage.busy_timeout_ms, 5000);
        assert_eq!(config.general.color, ColorSetting::Auto);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("clipstore.yaml");
        std::fs::write(&config_path, "storage: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(ClipstoreError::Config(_))
        ));
    }
}
