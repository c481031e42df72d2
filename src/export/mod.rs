//! Export and import
//!
//! - JSON: full state, machine-readable, re-importable
//! - YAML: full state, human-readable, re-importable
//! - CSV: the ledger only, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{TrackerError, TrackerResult};
use crate::services::ImportedState;

pub use self::csv::export_transactions_csv;
pub use json::{export_full_json, import_from_json, FullExport, ImportDocument, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};

/// File format for export and import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Guess from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(TrackerError::InvalidFormat(format!(
                "Unknown format '{}'. Use json, yaml or csv",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Parse an import document in the given format
///
/// CSV only carries the ledger, so it can't be imported.
pub fn parse_import(text: &str, format: ExportFormat) -> TrackerResult<ImportedState> {
    match format {
        ExportFormat::Json => import_from_json(text),
        ExportFormat::Yaml => import_from_yaml(text),
        ExportFormat::Csv => Err(TrackerError::InvalidFormat(
            "CSV exports contain only transactions and cannot be imported".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("backup")), ExportFormat::Json);
    }

    #[test]
    fn test_csv_import_rejected() {
        let err = parse_import("ID,Date\n", ExportFormat::Csv).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidFormat(_)));
    }
}
