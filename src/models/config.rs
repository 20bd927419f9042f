use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};
use crate::utils::path::get_database_path;

/// Inställningar för registreringsverktyget (settings-fil i TOML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_path: PathBuf,
    /// Loggnivå för tracing (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: get_database_path(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Ladda inställningar; saknad fil ger standardvärden
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| AppError::config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("finns_inte.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("entry.toml");

        let settings = Settings {
            database_path: PathBuf::from("/tmp/slakt.db"),
            log_level: "debug".into(),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Settings = toml::from_str(r#"log_level = "warn""#).unwrap();
        assert_eq!(loaded.log_level, "warn");
        assert_eq!(loaded.database_path, get_database_path());
    }

    #[test]
    fn test_broken_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trasig.toml");
        std::fs::write(&path, "log_level = ").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(AppError::Config(_))));
    }
}
