//! Audit entry data structures
//!
//! One entry per engine event, so the log reads as a history of every change
//! made to the balance, the ledger and the mission cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::services::EngineEvent;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// An expired cycle was replaced
    Rollover,
    /// State replaced from an import document
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Rollover => "ROLLOVER",
            Operation::Import => "IMPORT",
        };
        f.write_str(label)
    }
}

/// What the change applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Balance,
    Mission,
    /// The whole tracker state
    State,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Transaction => "Transaction",
            EntityType::Balance => "Balance",
            EntityType::Mission => "Mission",
            EntityType::State => "State",
        };
        f.write_str(label)
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Transaction id, cycle start date, or a fixed key
    pub entity_id: String,

    /// Human-readable label, e.g. a transaction description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn new(
        timestamp: DateTime<Utc>,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            before: None,
            after: None,
            summary: None,
        }
    }

    fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.entity_name = Some(name);
        }
        self
    }

    fn before<T: Serialize>(mut self, value: &T) -> Self {
        self.before = serde_json::to_value(value).ok();
        self
    }

    fn after<T: Serialize>(mut self, value: &T) -> Self {
        self.after = serde_json::to_value(value).ok();
        self
    }

    fn summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Describe an engine event as an audit entry
    pub fn from_event(event: &EngineEvent, timestamp: DateTime<Utc>) -> Self {
        match event {
            EngineEvent::TransactionAdded { transaction } => {
                Self::new(timestamp, Operation::Create, EntityType::Transaction, transaction.id.to_string())
                    .named(transaction.description.clone())
                    .after(transaction)
                    .summary(format!("{} {}", transaction.kind, transaction.amount))
            }
            EngineEvent::TransactionRemoved { transaction } => {
                Self::new(timestamp, Operation::Delete, EntityType::Transaction, transaction.id.to_string())
                    .named(transaction.description.clone())
                    .before(transaction)
                    .summary(format!("{} {}", transaction.kind, transaction.amount))
            }
            EngineEvent::BalanceChanged { balance } => {
                Self::new(timestamp, Operation::Update, EntityType::Balance, "balance")
                    .after(&json!({ "balance": balance }))
                    .summary(format!("balance: {}", balance))
            }
            EngineEvent::MissionChanged {
                mission,
                daily_target,
            } => Self::new(
                timestamp,
                Operation::Update,
                EntityType::Mission,
                mission.start_date().to_string(),
            )
            .after(mission)
            .summary(format!("daily target: {}", daily_target)),
            EngineEvent::CycleRolledOver {
                previous_start,
                start_date,
            } => Self::new(
                timestamp,
                Operation::Rollover,
                EntityType::Mission,
                start_date.to_string(),
            )
            .before(&json!({ "startDate": previous_start }))
            .after(&json!({ "startDate": start_date }))
            .summary(format!("cycle {} -> {}", previous_start, start_date)),
            EngineEvent::DayAdvanced { from, to } => {
                Self::new(timestamp, Operation::Update, EntityType::Mission, "current_day")
                    .summary(format!("day {} -> {}", from, to))
            }
            EngineEvent::StateImported { snapshot } => {
                Self::new(timestamp, Operation::Import, EntityType::State, "tracker")
                    .after(snapshot)
                    .summary(format!(
                        "balance {}, {} transactions",
                        snapshot.balance,
                        snapshot.transactions.len()
                    ))
            }
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(summary) = &self.summary {
            output.push_str(&format!(": {}", summary));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionDay, Money, Transaction, TransactionKind};
    use chrono::{NaiveDate, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn withdrawal() -> Transaction {
        Transaction::new(
            TransactionKind::Withdrawal,
            Money::from_cents(2550),
            "Lunch",
            at(),
            MissionDay::FIRST,
        )
    }

    #[test]
    fn test_transaction_events() {
        let txn = withdrawal();
        let added = AuditEntry::from_event(
            &EngineEvent::TransactionAdded {
                transaction: txn.clone(),
            },
            at(),
        );
        assert_eq!(added.operation, Operation::Create);
        assert_eq!(added.entity_type, EntityType::Transaction);
        assert_eq!(added.entity_id, txn.id.to_string());
        assert_eq!(added.entity_name.as_deref(), Some("Lunch"));
        assert!(added.after.is_some());

        let removed =
            AuditEntry::from_event(&EngineEvent::TransactionRemoved { transaction: txn }, at());
        assert_eq!(removed.operation, Operation::Delete);
        assert!(removed.before.is_some());
        assert!(removed.after.is_none());
    }

    #[test]
    fn test_rollover_event() {
        let event = EngineEvent::CycleRolledOver {
            previous_start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        let entry = AuditEntry::from_event(&event, at());
        assert_eq!(entry.operation, Operation::Rollover);
        assert_eq!(entry.entity_id, "2025-03-01");
        assert_eq!(entry.summary.as_deref(), Some("cycle 2025-02-01 -> 2025-03-01"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::from_event(
            &EngineEvent::TransactionAdded {
                transaction: withdrawal(),
            },
            at(),
        );
        let formatted = entry.format_human_readable();
        assert!(formatted.starts_with("[2025-03-01 12:00:00 UTC] CREATE Transaction txn-"));
        assert!(formatted.contains("(Lunch)"));
        assert!(formatted.ends_with("Withdraw 25.50"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::from_event(
            &EngineEvent::BalanceChanged {
                balance: Money::from_cents(7000),
            },
            at(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("entity_name"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Update);
        assert_eq!(back.entity_type, EntityType::Balance);
        assert_eq!(back.after.unwrap()["balance"], "70.00");
    }
}
