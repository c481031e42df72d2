//! On-disk helpers for the state file
//!
//! The state file is a flat JSON object of string entries. It is replaced by
//! writing a sibling `.tmp` file and renaming it over the original, so a
//! crash mid-write leaves the previous state readable.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};

/// Raw entries as stored in the state file
pub type Entries = BTreeMap<String, String>;

/// Load the entries at `path`; a missing file holds no entries
pub fn read_entries(path: &Path) -> TrackerResult<Entries> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace the state file with `entries`
pub fn write_entries(path: &Path, entries: &Entries) -> TrackerResult<()> {
    let contents =
        serde_json::to_vec_pretty(entries).map_err(|e| storage_error("encode", path, e))?;
    write_atomic(path, &contents)
}

/// Replace `path` with `contents` via a temp file in the same directory
pub fn write_atomic(path: &Path, contents: &[u8]) -> TrackerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        // Best effort; the original file is still intact
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error("write", path, e));
    }

    tracing::trace!(path = %path.display(), bytes = contents.len(), "file replaced");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}
