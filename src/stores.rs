//! Key-value store implementations
//!
//! Provides a file-backed store, one file per key inside a directory, and
//! an in-memory store for tests and hosts without a writable disk.

use crate::traits::KeyValueStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extension given to every value file
const VALUE_EXTENSION: &str = "txt";

/// Filesystem implementation
///
/// Each key maps to `<dir>/<sanitized key>.txt`. The directory is created
/// on the first write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in the platform data directory
    ///
    /// - macOS: `~/Library/Application Support/sveltool/`
    /// - Linux: `~/.local/share/sveltool/`
    /// - Windows: `%APPDATA%\sveltool\data\`
    ///
    /// # Errors
    /// Returns an error if the HOME environment variable is not set (fallback case only).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {:?}", self.dir))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write to {:?}", path))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }
}

/// In-memory implementation
///
/// Values live as long as the store. Cloning is not supported; share it
/// behind an `Arc` instead.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.lock().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Returns the platform-specific data directory for this library
///
/// Falls back to `~/.local/share/sveltool` if platform detection fails.
///
/// # Errors
/// Returns an error if the HOME environment variable is not set (fallback case only).
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "sveltool") {
        Ok(proj_dirs.data_dir().to_path_buf())
    } else {
        let home = std::env::var("HOME").context("HOME not set")?;
        Ok(PathBuf::from(home).join(".local/share/sveltool"))
    }
}

/// Turns a key into a safe file stem
///
/// Replaces path separators, wildcards and control characters with
/// underscores so a key can never escape the store directory. Keys made
/// only of dots are prefixed for the same reason.
fn sanitize_key(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        format!("_{}", sanitized)
    } else {
        sanitized
    }
}
