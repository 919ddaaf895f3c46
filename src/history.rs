//! Recent-search persistence.
//!
//! The autocomplete session reads and writes its history through the
//! [`HistoryStore`] capability: a single string slot with get/set/remove semantics.
//! The payload is a JSON array of strings, most recent first.

use crate::error::HistoryError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A single persisted string value.
///
/// Implementations are not expected to merge concurrent writers; hosts that share
/// one store between sessions must serialize writes themselves.
pub trait HistoryStore {
    /// The stored value, or `None` if nothing has been stored.
    fn get(&self) -> Result<Option<String>, HistoryError>;
    /// Replaces the stored value.
    fn set(&self, value: &str) -> Result<(), HistoryError>;
    /// Deletes the stored value.
    fn remove(&self) -> Result<(), HistoryError>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for &S {
    fn get(&self) -> Result<Option<String>, HistoryError> {
        (**self).get()
    }

    fn set(&self, value: &str) -> Result<(), HistoryError> {
        (**self).set(value)
    }

    fn remove(&self) -> Result<(), HistoryError> {
        (**self).remove()
    }
}

/// In-process store, for tests and hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw payload.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn get(&self) -> Result<Option<String>, HistoryError> {
        Ok(self.value.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set(&self, value: &str) -> Result<(), HistoryError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), HistoryError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Store backed by one file on disk.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/material-search/recent-searches.json`, if the platform has one.
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("material-search").join("recent-searches.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for FileHistoryStore {
    fn get(&self) -> Result<Option<String>, HistoryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set(&self, value: &str) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, value).map_err(|e| self.io_error(e))
    }

    fn remove(&self) -> Result<(), HistoryError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(self.io_error(e)),
            _ => Ok(()),
        }
    }
}

/// Most-recent-first list of distinct committed queries, bounded in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
    capacity: usize,
}

impl RecentSearches {
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Decodes a stored payload, keeping at most `capacity` entries.
    ///
    /// Entries are trimmed; blanks and later duplicates are dropped. Anything that
    /// is not a JSON array of strings yields an empty history.
    pub fn from_payload(payload: &str, capacity: usize) -> Self {
        let stored: Vec<String> = match serde_json::from_str(payload) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable recent searches: {}", e);
                Vec::new()
            }
        };

        let mut entries: Vec<String> = Vec::with_capacity(stored.len().min(capacity));
        for entry in &stored {
            if entries.len() == capacity {
                break;
            }
            let entry = entry.trim();
            if !entry.is_empty() && !entries.iter().any(|kept| kept == entry) {
                entries.push(entry.to_string());
            }
        }
        Self { entries, capacity }
    }

    pub fn to_payload(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Moves `term` (trimmed) to the front, dropping any earlier copy and the
    /// oldest entry beyond capacity. Returns false for blank terms.
    pub fn push(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        self.entries.retain(|entry| entry != term);
        self.entries.insert(0, term.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
