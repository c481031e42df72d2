//! YAML export and import
//!
//! Same document as the JSON export, with a comment header for humans.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::{FullExport, ImportDocument};
use crate::services::ImportedState;

/// Write a full export as YAML
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> TrackerResult<()> {
    writeln!(writer, "# Mission Tracker Export")?;
    writeln!(writer, "# Generated: {}", export.export_date)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "#")?;
    writeln!(writer, "# Restore with: mission import <file>")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}

/// Parse a YAML import document
pub fn import_from_yaml(yaml_str: &str) -> TrackerResult<ImportedState> {
    let document: ImportDocument = serde_yaml::from_str(yaml_str)
        .map_err(|e| TrackerError::InvalidFormat(format!("Malformed YAML import: {}", e)))?;
    document.into_state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionCycle, Money};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn export() -> FullExport {
        FullExport {
            schema_version: "1.0.0".to_string(),
            app_version: "0.1.0".to_string(),
            balance: Money::from_cents(2500),
            daily_target: Money::zero(),
            transactions: Vec::new(),
            current_mission: MissionCycle::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            export_date: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_yaml_has_header_and_reads_back() {
        let mut buffer = Vec::new();
        export_full_yaml(&export(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Mission Tracker Export"));
        assert!(text.contains("currentMission:"));

        let state = import_from_yaml(&text).unwrap();
        assert_eq!(state.balance, Money::from_cents(2500));
        assert_eq!(state.mission, export().current_mission);
    }

    #[test]
    fn test_yaml_missing_transactions() {
        let err = import_from_yaml("balance: '5.00'\n").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidFormat(_)));
        assert!(err.to_string().contains("transactions"));
    }
}
