//! Configuration management for Romshelf
//!
//! Handles where the asset bundle and preference database live, how long the
//! recent list may grow, and how the native emulator is launched.

mod emulator_settings;
mod library_settings;

pub use emulator_settings::EmulatorSettings;
pub use library_settings::LibrarySettings;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/romshelf";
pub const USER_CONFIG_DIR: &str = "/roms/.romshelf";

/// Name of the configuration file inside either directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main Romshelf configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RomshelfConfig {
    #[serde(default)]
    pub library: LibrarySettings,

    #[serde(default)]
    pub emulator: EmulatorSettings,
}

impl RomshelfConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        let user_config = Path::new(USER_CONFIG_DIR).join(CONFIG_FILE);
        if user_config.exists() {
            return Self::load(&user_config);
        }

        let system_config = Path::new(CONFIG_DIR).join(CONFIG_FILE);
        if system_config.exists() {
            return Self::load(&system_config);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the library and launcher cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library.recent_limit == 0 {
            return Err(ConfigError::Invalid(
                "library.recent_limit must be at least 1".into(),
            ));
        }
        if self.library.image_extension.is_empty() {
            return Err(ConfigError::Invalid(
                "library.image_extension must not be empty".into(),
            ));
        }
        if self.emulator.width == 0 || self.emulator.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "emulator geometry {}x{} is not usable",
                self.emulator.width, self.emulator.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = RomshelfConfig::default();
        assert_eq!(config.library.recent_limit, 20);
        assert_eq!(config.emulator.aux_rom, "roms/GENIE.nes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"
[library]
assets_dir = "/opt/assets"
recent_limit = 5
"#
        )
        .unwrap();

        let config = RomshelfConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.library.assets_dir, PathBuf::from("/opt/assets"));
        assert_eq!(config.library.recent_limit, 5);
        assert_eq!(config.library.image_extension, "jpg");
        assert_eq!(config.emulator, EmulatorSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = RomshelfConfig::load(Path::new("/nonexistent/romshelf.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_zero_recent_limit_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[library]\nrecent_limit = 0\n").unwrap();

        let err = RomshelfConfig::load(temp_file.path()).unwrap_err();
        assert!(format!("{}", err).contains("recent_limit"));
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let mut config = RomshelfConfig::default();
        config.emulator.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_creates_parent_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = RomshelfConfig::default();
        config.emulator.binary = "/usr/local/bin/nes".into();
        config.save(&path).unwrap();

        let loaded = RomshelfConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[library\nrecent_limit = ").unwrap();

        let err = RomshelfConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
