//! Engine change notifications
//!
//! The engine queues one event per observable change. Front ends drain the
//! queue after each call to refresh their view and feed the audit log.

use chrono::NaiveDate;
use serde::Serialize;

use super::engine::TrackerSnapshot;
use crate::models::{MissionCycle, MissionDay, Money, Transaction};

/// Something the engine changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The running balance moved
    BalanceChanged { balance: Money },

    /// Targets or expenses of the current cycle changed
    MissionChanged {
        mission: MissionCycle,
        daily_target: Money,
    },

    TransactionAdded { transaction: Transaction },

    TransactionRemoved { transaction: Transaction },

    /// The previous cycle expired and a fresh one started today
    CycleRolledOver {
        previous_start: NaiveDate,
        start_date: NaiveDate,
    },

    /// Midnight passed within the same cycle
    DayAdvanced { from: MissionDay, to: MissionDay },

    /// State was replaced wholesale from an import document
    StateImported { snapshot: Box<TrackerSnapshot> },
}

impl EngineEvent {
    /// Short machine-readable name, used as the audit operation
    pub fn name(&self) -> &'static str {
        match self {
            Self::BalanceChanged { .. } => "balance_changed",
            Self::MissionChanged { .. } => "mission_changed",
            Self::TransactionAdded { .. } => "transaction_added",
            Self::TransactionRemoved { .. } => "transaction_removed",
            Self::CycleRolledOver { .. } => "cycle_rolled_over",
            Self::DayAdvanced { .. } => "day_advanced",
            Self::StateImported { .. } => "state_imported",
        }
    }
}
