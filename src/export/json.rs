//! JSON export and import
//!
//! A full export carries everything needed to restore the tracker:
//! balance, daily target, the ledger and the current mission cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{MissionCycle, Money, Transaction};
use crate::services::{ImportedState, TrackerSnapshot};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full state export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    pub schema_version: String,
    pub app_version: String,
    pub balance: Money,
    pub daily_target: Money,
    pub transactions: Vec<Transaction>,
    pub current_mission: MissionCycle,
    pub export_date: DateTime<Utc>,
}

impl FullExport {
    pub fn from_snapshot(snapshot: TrackerSnapshot, exported_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            balance: snapshot.balance,
            daily_target: snapshot.daily_target,
            transactions: snapshot.transactions,
            current_mission: snapshot.mission,
            export_date: exported_at,
        }
    }
}

/// Import document as read from disk
///
/// Every field is optional so that a missing one is reported as
/// `InvalidFormat` naming the field, rather than a generic parse error.
/// Unknown fields (schema and app version, export date) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub daily_target: Option<Money>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub current_mission: Option<MissionCycle>,
}

impl ImportDocument {
    /// Check required fields; `dailyTarget` defaults to zero
    pub fn into_state(self) -> TrackerResult<ImportedState> {
        let missing = |field: &str| {
            TrackerError::InvalidFormat(format!("Import document is missing '{}'", field))
        };

        Ok(ImportedState {
            balance: self.balance.ok_or_else(|| missing("balance"))?,
            daily_target: self.daily_target.unwrap_or_default(),
            transactions: self.transactions.ok_or_else(|| missing("transactions"))?,
            mission: self.current_mission.ok_or_else(|| missing("currentMission"))?,
        })
    }
}

/// Write a full export as JSON
pub fn export_full_json<W: Write>(
    export: &FullExport,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))
}

/// Parse a JSON import document
pub fn import_from_json(json_str: &str) -> TrackerResult<ImportedState> {
    let document: ImportDocument = serde_json::from_str(json_str)
        .map_err(|e| TrackerError::InvalidFormat(format!("Malformed JSON import: {}", e)))?;
    document.into_state()
}
