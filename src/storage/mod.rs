//! Storage layer for the mission tracker
//!
//! Tracker state lives in a string key-value store. Two backends are
//! provided: an in-memory map and a JSON file written atomically.
//! [`StateStore`] encodes engine state into the fixed set of keys.

pub mod file;
pub mod file_io;
pub mod kv;
pub mod memory;
pub mod state;

pub use file::JsonFileStore;
pub use file_io::{read_entries, write_atomic, write_entries, Entries};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use state::{PersistedState, StateStore, StateView};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;

/// Open the on-disk store under the configured data directory
pub fn open_file_store(paths: &TrackerPaths) -> TrackerResult<JsonFileStore> {
    paths.ensure_directories()?;
    JsonFileStore::open(paths.state_file())
}
