//! Configuration management
//!
//! Handles loading and saving the library settings: formatting defaults
//! and where the notepad text is persisted.
//!
//! Configuration files are stored in platform-specific directories:
//! - macOS: `~/Library/Application Support/sveltool/config.yaml`
//! - Linux: `~/.config/sveltool/config.yaml`
//! - Windows: `%APPDATA%\sveltool\config\config.yaml`

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::notes::{NotesStore, NOTES_KEY};
use crate::stores::{self, FileKeyValueStore};
use crate::utils::formatting::FormatOptions;
use crate::utils::locale::{DEFAULT_CURRENCY, DEFAULT_LOCALE};

/// Formatting defaults applied by hosts that read the config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDefaults {
    /// Locale tag, e.g. `en-US`
    #[serde(default = "default_locale")]
    pub locale: String,
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fraction digits for currency amounts; the per-function default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl Default for FormatDefaults {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency: default_currency(),
            precision: None,
        }
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_notes_key() -> String {
    NOTES_KEY.to_string()
}

/// Where and under which key the notepad text lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesSettings {
    /// Directory for the notes file; the platform data directory when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Storage key for the notepad text
    #[serde(default = "default_notes_key")]
    pub key: String,
}

impl Default for NotesSettings {
    fn default() -> Self {
        Self {
            storage_dir: None,
            key: default_notes_key(),
        }
    }
}

/// Library configuration
///
/// Persisted as YAML in the user's config directory. Every section is
/// optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub format: FormatDefaults,
    #[serde(default)]
    pub notes: NotesSettings,
}

impl Config {
    /// Loads configuration from the default config file location
    ///
    /// # Returns
    /// - `Ok(Config)` with the loaded configuration, or defaults if the file doesn't exist
    /// - `Err` if the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path
    ///
    /// # Errors
    /// Returns an error if the file exists but is malformed or unreadable.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// Saves the configuration to the default config file location
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        debug!(path = ?path, "Saved config");
        Ok(())
    }

    /// Returns the platform-specific configuration file path
    ///
    /// Falls back to `~/.config/sveltool/config.yaml` if platform detection fails.
    ///
    /// # Errors
    /// Returns an error if the HOME environment variable is not set (fallback case only).
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "sveltool") {
            Ok(proj_dirs.config_dir().join("config.yaml"))
        } else {
            let home = std::env::var("HOME").context("HOME not set")?;
            Ok(PathBuf::from(home).join(".config/sveltool/config.yaml"))
        }
    }

    /// Formatting options carrying the configured defaults
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            locale: Some(self.format.locale.clone()),
            currency: Some(self.format.currency.clone()),
            precision: self.format.precision,
        }
    }

    /// Opens the notepad over a file store at the configured directory
    ///
    /// # Errors
    /// Returns an error if no storage directory is configured and the
    /// platform data directory cannot be determined.
    pub fn open_notes(&self) -> Result<NotesStore> {
        let dir = match &self.notes.storage_dir {
            Some(dir) => dir.clone(),
            None => stores::default_data_dir()?,
        };
        let backend = Arc::new(FileKeyValueStore::new(dir));
        Ok(NotesStore::open_with_key(backend, self.notes.key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format.locale, "en-US");
        assert_eq!(config.notes.key, NOTES_KEY);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/config.yaml");

        let mut config = Config::default();
        config.format.locale = "de-DE".to_string();
        config.format.currency = "EUR".to_string();
        config.notes.storage_dir = Some(temp.path().join("notes"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "format:\n  currency: GBP\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.format.currency, "GBP");
        assert_eq!(config.format.locale, "en-US");
        assert_eq!(config.notes, NotesSettings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "format: [not, a, mapping").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_format_options_use_config() {
        let mut config = Config::default();
        config.format.currency = "JPY".to_string();
        config.format.precision = Some(0);

        let formatted =
            crate::utils::formatting::format_currency(1500.0, &config.format_options()).unwrap();
        assert_eq!(formatted, "¥1,500");
    }

    #[test]
    fn test_open_notes_uses_storage_dir() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.notes.storage_dir = Some(temp.path().to_path_buf());

        config.open_notes().unwrap().set_text("from config").unwrap();
        assert_eq!(config.open_notes().unwrap().text(), "from config");
        assert!(temp.path().join("sveltool-notes.txt").exists());
    }
}
