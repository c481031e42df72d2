//! JSON-file key-value store
//!
//! All keys live in a single JSON object on disk. The file is read once when
//! the store is opened and rewritten atomically on every change.

use std::path::{Path, PathBuf};

use super::file_io::{read_entries, write_entries, Entries};
use super::kv::KeyValueStore;
use crate::error::TrackerResult;

/// Key-value store persisted as one JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Entries,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path.display(), "opened state file");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> TrackerResult<()> {
        write_entries(&self.path, &self.entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> TrackerResult<()> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }

    fn remove(&mut self, key: &str) -> TrackerResult<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn set_many(&mut self, entries: Vec<(&str, String)>) -> TrackerResult<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value);
        }
        self.save()
    }
}
