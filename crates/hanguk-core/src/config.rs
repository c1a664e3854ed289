use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{HangukError, Result};

/// Top-level configuration for the Hanguk skill.
///
/// Loaded from `~/.hanguk/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub localization: LocalizationConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl SkillConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SkillConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HangukError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Locale bundle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Locale used when the request locale has no bundle.
    pub fallback_locale: String,
    /// Optional directory of `<locale>.toml` bundles merged over the
    /// built-in ones at start-up.
    pub bundle_dir: Option<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            fallback_locale: "en".to_string(),
            bundle_dir: None,
        }
    }
}

/// Settings for locally driven sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Locale stamped on requests built by the interactive console.
    pub default_locale: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_locale: "en-US".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkillConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.localization.fallback_locale, "en");
        assert!(config.localization.bundle_dir.is_none());
        assert_eq!(config.session.default_locale, "en-US");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SkillConfig = toml::from_str(
            r#"
            [localization]
            fallback_locale = "es"
            "#,
        )
        .unwrap();
        assert_eq!(config.localization.fallback_locale, "es");
        assert!(config.localization.bundle_dir.is_none());
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.session.default_locale, "en-US");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: SkillConfig = toml::from_str("").unwrap();
        assert_eq!(config.localization.fallback_locale, "en");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SkillConfig::default();
        config.general.log_level = "debug".to_string();
        config.localization.bundle_dir = Some("/opt/hanguk/locales".to_string());
        config.save(&path).unwrap();

        let loaded = SkillConfig::load(&path).unwrap();
        assert_eq!(loaded.general.log_level, "debug");
        assert_eq!(
            loaded.localization.bundle_dir.as_deref(),
            Some("/opt/hanguk/locales")
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SkillConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, HangukError::Io(_)));
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\nlog_level = 3").unwrap();
        let config = SkillConfig::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");
    }
}
