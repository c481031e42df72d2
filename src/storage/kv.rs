//! Key-value store abstraction
//!
//! Tracker state is persisted as a handful of string entries under fixed
//! keys. Anything that can get and set strings can back the engine.

use std::fmt;

use crate::error::TrackerResult;

/// String key-value storage backend
pub trait KeyValueStore: fmt::Debug {
    /// Read the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String) -> TrackerResult<()>;

    /// Remove `key` if present
    fn remove(&mut self, key: &str) -> TrackerResult<()>;

    /// Store several entries at once
    ///
    /// Backends that write to disk should override this to persist the whole
    /// batch in one write.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> TrackerResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
