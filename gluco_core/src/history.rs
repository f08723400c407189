//! Bounded calculation history.
//!
//! Newest-first, capped at 50 entries; the oldest entry is evicted when the
//! cap is exceeded. Entries are immutable after creation - they can only be
//! removed individually or cleared in bulk.

use crate::{Error, HistoryItem, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Maximum number of retained history entries.
pub const HISTORY_CAP: usize = 50;

/// Append-only bounded log of past calculations, newest first.
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an item, then truncate to the most recent [`HISTORY_CAP`].
    pub fn append(&mut self, item: HistoryItem) {
        self.items.insert(0, item);
        self.items.truncate(HISTORY_CAP);
    }

    /// Remove at most one entry by id. Returns whether anything was removed;
    /// a missing id is a no-op, not an error.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() < before
    }

    /// Drop all entries unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only view of the bounded sequence, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load history from a file with shared locking.
    ///
    /// Returns an empty store if the file is missing or corrupt. A file that
    /// somehow grew past the cap is truncated on load.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No history file found, starting empty");
            return Ok(Self::new());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open history file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                return Ok(Self::new());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock history file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read history file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::new());
        }

        file.unlock()?;

        match serde_json::from_str::<Vec<HistoryItem>>(&contents) {
            Ok(mut items) => {
                items.truncate(HISTORY_CAP);
                tracing::debug!("Loaded {} history entries from {:?}", items.len(), path);
                Ok(Self { items })
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                Ok(Self::new())
            }
        }
    }

    /// Save history atomically: temp file, exclusive lock, fsync, rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "history path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(&self.items)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} history entries to {:?}", self.items.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SettingsProfile;
    use chrono::Utc;

    fn create_test_item(meal: &str) -> HistoryItem {
        let settings = SettingsProfile::default();
        let result = crate::dose::compute_dose(
            &[],
            Some(200),
            &settings,
            crate::correction::default_correction_table(),
        );
        HistoryItem {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            meal_text: meal.into(),
            glucose: Some("200".into()),
            result,
        }
    }

    #[test]
    fn test_append_prepends_newest_first() {
        let mut store = HistoryStore::new();
        store.append(create_test_item("older"));
        store.append(create_test_item("newer"));

        assert_eq!(store.items()[0].meal_text, "newer");
        assert_eq!(store.items()[1].meal_text, "older");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut store = HistoryStore::new();

        store.append(create_test_item("first"));
        for i in 1..51 {
            store.append(create_test_item(&format!("meal {}", i)));
        }

        assert_eq!(store.len(), HISTORY_CAP);
        assert_eq!(store.items()[0].meal_text, "meal 50");
        assert!(store.items().iter().all(|i| i.meal_text != "first"));
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = HistoryStore::new();
        let item = create_test_item("target");
        let id = item.id;
        store.append(create_test_item("keep"));
        store.append(item);

        assert!(store.remove(&id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].meal_text, "keep");
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = HistoryStore::new();
        store.append(create_test_item("only"));

        assert!(!store.remove(&Uuid::new_v4()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = HistoryStore::new();
        store.append(create_test_item("a"));
        store.append(create_test_item("b"));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");

        let mut store = HistoryStore::new();
        store.append(create_test_item("rice and dal"));
        store.append(create_test_item("apple"));
        store.save(&path).unwrap();

        let loaded = HistoryStore::load(&path).unwrap();
        assert_eq!(loaded.items(), store.items());
    }

    #[test]
    fn test_load_missing_starts_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");

        let loaded = HistoryStore::load(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_corrupt_starts_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, "not json at all").unwrap();

        let loaded = HistoryStore::load(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
