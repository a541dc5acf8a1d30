//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data.

use crate::codec::{self, ValidationMode, GENERATED_BYTES};
use crate::error::{ConfigError, ConfigResult};
use crate::reader::DEFAULT_AID;
use crate::storage::DEFAULT_IDENTIFIER;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/hce-uid)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/hce-uid)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    pub fn resolve() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "lexycon", "hce-uid")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        })
    }

    /// Keep configuration and data under a single directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    /// Create the directories if they do not exist yet.
    pub fn ensure(&self) -> ConfigResult<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the stored identifier record.
    pub fn identifier_file(&self) -> PathBuf {
        self.data_dir.join("identifier.json")
    }
}

/// Capabilities reported by the simulated NFC adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareSettings {
    /// Whether the device has NFC at all.
    pub supported: bool,
    /// Whether NFC is switched on.
    pub enabled: bool,
}

impl Default for HardwareSettings {
    fn default() -> Self {
        Self {
            supported: true,
            enabled: true,
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Identifier reported before anything has been stored.
    pub default_identifier: String,
    /// Byte count of generated identifiers.
    pub generated_bytes: usize,
    /// How manual edits are validated.
    pub validation: ValidationMode,
    /// Simulated adapter capabilities.
    pub hardware: HardwareSettings,
    /// Application identifier the door reader selects.
    pub aid: String,
    /// Default output format.
    pub default_output_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_identifier: DEFAULT_IDENTIFIER.to_string(),
            generated_bytes: GENERATED_BYTES,
            validation: ValidationMode::default(),
            hardware: HardwareSettings::default(),
            aid: DEFAULT_AID.to_string(),
            default_output_format: "plain".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            tracing::debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self, paths: &Paths) -> ConfigResult<PathBuf> {
        paths.ensure()?;
        let file = paths.settings_file();

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&file, content).map_err(|e| ConfigError::WriteFailed {
            path: file.clone(),
            reason: e.to_string(),
        })?;
        Ok(file)
    }

    /// Validate the settings.
    pub fn validate(&self) -> ConfigResult<()> {
        codec::validate_with(&self.default_identifier, self.validation).map_err(|e| {
            ConfigError::InvalidValue {
                key: "default_identifier",
                reason: e.to_string(),
            }
        })?;

        if self.generated_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "generated_bytes",
                reason: "must be at least 1".to_string(),
            });
        }

        crate::reader::select_aid_command(&self.aid).map_err(|e| ConfigError::InvalidValue {
            key: "aid",
            reason: e.to_string(),
        })?;

        if !["plain", "json"].contains(&self.default_output_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "default_output_format",
                reason: format!("unknown format: {}", self.default_output_format),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_identifier, "00000000");
        assert_eq!(settings.generated_bytes, 6);
        assert_eq!(settings.validation, ValidationMode::Lenient);
        assert!(settings.hardware.supported);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let parsed: AppSettings =
            serde_json::from_str(r#"{"validation":"strict","hardware":{"enabled":false}}"#)
                .unwrap();
        assert_eq!(parsed.validation, ValidationMode::Strict);
        assert!(parsed.hardware.supported);
        assert!(!parsed.hardware.enabled);
        assert_eq!(parsed.generated_bytes, 6);
    }

    #[test]
    fn test_validate_rejects_bad_default() {
        let settings = AppSettings {
            default_identifier: "xyz".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { key: "default_identifier", .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());
        let settings = AppSettings {
            generated_bytes: 4,
            ..AppSettings::default()
        };

        let file = settings.save(&paths).unwrap();
        assert_eq!(file, paths.settings_file());
        assert_eq!(AppSettings::load(&paths).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path().join("nothing-here"));
        assert_eq!(AppSettings::load(&paths).unwrap(), AppSettings::default());
    }
}
