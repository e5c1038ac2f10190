//! Notepad state
//!
//! Holds the notepad text and its enabled flag. The text is read from a
//! [`KeyValueStore`] when the store is opened and written back on every
//! change; the enabled flag always starts off and is never persisted.
//!
//! Both values are published through `tokio::sync::watch` channels so UI
//! code can subscribe to changes. Concurrent writers are last-writer-wins,
//! and the persisted value always matches the last text published.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::traits::KeyValueStore;

/// Key the notepad text is stored under
pub const NOTES_KEY: &str = "sveltool-notes";

/// Owned notepad state with persistence
pub struct NotesStore {
    text: watch::Sender<String>,
    enabled: watch::Sender<bool>,
    backend: Arc<dyn KeyValueStore>,
    key: String,
    // Held across publish + persist so writes reach the backend in publish order
    write_lock: Mutex<()>,
}

impl NotesStore {
    /// Opens the store under the default [`NOTES_KEY`]
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(backend, NOTES_KEY)
    }

    /// Opens the store under a custom key
    ///
    /// A missing or unreadable value starts the notepad empty; read
    /// failures are logged rather than returned.
    pub fn open_with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = match backend.get(&key) {
            Ok(Some(text)) => {
                debug!(key = %key, bytes = text.len(), "Loaded persisted notes");
                text
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read persisted notes, starting empty");
                String::new()
            }
        };

        let (text, _) = watch::channel(initial);
        let (enabled, _) = watch::channel(false);

        Self {
            text,
            enabled,
            backend,
            key,
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current notepad text
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replaces the text and persists it
    ///
    /// Subscribers see the new text even if persisting fails.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write.
    pub fn set_text(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let _guard = self.write_lock.lock();
        self.text.send_replace(text.clone());
        self.persist(&text)
    }

    /// Edits the text in place and persists the result
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write.
    pub fn update_text<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut String),
    {
        let _guard = self.write_lock.lock();
        self.text.send_modify(edit);
        let snapshot = self.text();
        self.persist(&snapshot)
    }

    /// Empties the notepad and removes the persisted value
    ///
    /// # Errors
    /// Returns an error if the backend cannot remove the value.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.text.send_replace(String::new());
        debug!(key = %self.key, "Clearing persisted notes");
        self.backend
            .remove(&self.key)
            .with_context(|| format!("Failed to clear notes under '{}'", self.key))
    }

    /// Receiver that observes every text change
    pub fn subscribe_text(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.borrow()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.send_replace(enabled);
    }

    /// Flips the enabled flag and returns the new value
    pub fn toggle_enabled(&self) -> bool {
        self.enabled.send_modify(|enabled| *enabled = !*enabled);
        self.is_enabled()
    }

    /// Receiver that observes every enabled-flag change
    pub fn subscribe_enabled(&self) -> watch::Receiver<bool> {
        self.enabled.subscribe()
    }

    fn persist(&self, text: &str) -> Result<()> {
        debug!(key = %self.key, bytes = text.len(), "Persisting notes");
        self.backend.set(&self.key, text).map_err(|e| {
            warn!(key = %self.key, error = %e, "Failed to persist notes");
            e.context(format!("Failed to persist notes under '{}'", self.key))
        })
    }
}
