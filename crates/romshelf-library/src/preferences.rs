//! Durable storage for user-ordered ROM lists

use crate::LibraryError;
use std::collections::HashMap;

/// Separator of the old single-string list format
pub const LEGACY_SEPARATOR: char = ';';

/// Key/value store of ordered ROM path lists
///
/// Writes replace the whole list; the last writer wins.
pub trait PreferenceStore {
    /// Load the list stored under `key`, empty if absent
    fn load_list(&self, key: &str) -> Result<Vec<String>, LibraryError>;

    /// Replace the list stored under `key`
    fn save_list(&mut self, key: &str, entries: &[String]) -> Result<(), LibraryError>;
}

/// Process-local store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    lists: HashMap<String, Vec<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a list, as if it had been persisted earlier
    pub fn with_list<I, S>(mut self, key: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(key.to_string(), entries.into_iter().map(Into::into).collect());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_list(&self, key: &str) -> Result<Vec<String>, LibraryError> {
        Ok(self.lists.get(key).cloned().unwrap_or_default())
    }

    fn save_list(&mut self, key: &str, entries: &[String]) -> Result<(), LibraryError> {
        self.lists.insert(key.to_string(), entries.to_vec());
        Ok(())
    }
}

/// Split an old semicolon-joined list
///
/// Leading, trailing and doubled separators are tolerated.
pub fn decode_legacy(raw: &str) -> Vec<String> {
    raw.split(LEGACY_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a list in the old semicolon format, without a leading separator
pub fn encode_legacy(entries: &[String]) -> Result<String, LibraryError> {
    if let Some(bad) = entries.iter().find(|e| e.contains(LEGACY_SEPARATOR)) {
        return Err(LibraryError::InvalidRomPath(bad.clone()));
    }
    Ok(entries.join(LEGACY_SEPARATOR.to_string().as_str()))
}
