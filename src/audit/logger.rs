//! Append-only audit log
//!
//! Each entry is one JSON line (JSONL). Writes are flushed immediately so a
//! crash loses at most the entry being written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::entry::AuditEntry;
use crate::error::{TrackerError, TrackerResult};

/// Writes and reads the audit log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append a single entry
    pub fn log(&self, entry: &AuditEntry) -> TrackerResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> TrackerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        for entry in entries {
            let line = serde_json::to_string(entry)?;
            writeln!(file, "{}", line)
                .map_err(|e| TrackerError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn entry_count(&self) -> TrackerResult<usize> {
        Ok(self.read_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use crate::models::{MissionDay, Money};
    use crate::services::EngineEvent;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn day_advanced(to: u8) -> AuditEntry {
        AuditEntry::from_event(
            &EngineEvent::DayAdvanced {
                from: MissionDay::new(to - 1).unwrap(),
                to: MissionDay::new(to).unwrap(),
            },
            Utc.with_ymd_and_hms(2025, 3, to as u32, 0, 0, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert_eq!(logger.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, temp) = logger();
        let entry = AuditEntry::from_event(
            &EngineEvent::BalanceChanged {
                balance: Money::from_cents(100),
            },
            Utc::now(),
        );
        logger.log(&entry).unwrap();

        // A fresh logger on the same file sees the entry
        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].entity_type, EntityType::Balance);
    }

    #[test]
    fn test_batch_and_recent() {
        let (logger, _temp) = logger();
        let entries: Vec<_> = (2..=6).map(day_advanced).collect();
        logger.log_batch(&entries).unwrap();
        logger.log_batch(&[]).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 5);
        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].summary.as_deref(), Some("day 4 -> 5"));
        assert_eq!(recent[1].summary.as_deref(), Some("day 5 -> 6"));
    }

    #[test]
    fn test_corrupt_line_is_json_error() {
        let (logger, _temp) = logger();
        logger.log(&day_advanced(2)).unwrap();
        std::fs::write(
            logger.path(),
            format!("{}\nnot json\n", std::fs::read_to_string(logger.path()).unwrap().trim()),
        )
        .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
