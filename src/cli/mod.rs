//! CLI command handlers
//!
//! Bridges clap argument parsing with the accounting engine. Each command
//! runs against a [`Session`], which owns the engine and forwards engine
//! events to the audit log.

pub mod audit;
pub mod export;
pub mod mission;
pub mod transaction;

pub use audit::{handle_audit_command, AuditCommands};
pub use export::{handle_export_command, ExportCommands};
pub use mission::{handle_mission_command, MissionCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::audit::{AuditEntry, AuditLogger};
use crate::clock::Clock;
use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::services::AccountingEngine;
use crate::storage::open_file_store;

/// Engine plus the front-end state around it
#[derive(Debug)]
pub struct Session {
    pub engine: AccountingEngine,
    pub settings: Settings,
    audit: AuditLogger,
}

impl Session {
    /// Open the on-disk state under `paths`
    pub fn open(paths: &TrackerPaths, settings: Settings, clock: Box<dyn Clock>) -> TrackerResult<Self> {
        let store = open_file_store(paths)?;
        let engine = AccountingEngine::open(Box::new(store), clock)?;
        let mut session = Self {
            engine,
            settings,
            audit: AuditLogger::new(paths.audit_log()),
        };
        // Rollover on load is worth recording too
        session.record_events()?;
        Ok(session)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Move queued engine events into the audit log
    pub fn record_events(&mut self) -> TrackerResult<usize> {
        drain_to_audit(&mut self.engine, &self.audit)
    }
}

/// Drain engine events into `audit`, returning how many were written
pub fn drain_to_audit(engine: &mut AccountingEngine, audit: &AuditLogger) -> TrackerResult<usize> {
    let events = engine.take_events();
    if events.is_empty() {
        return Ok(0);
    }

    let now = engine.now();
    let entries: Vec<_> = events
        .iter()
        .map(|event| AuditEntry::from_event(event, now))
        .collect();
    audit.log_batch(&entries)?;
    tracing::debug!(count = entries.len(), "audit entries written");
    Ok(entries.len())
}

/// Parse a user-supplied amount
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| TrackerError::InvalidAmount(format!("'{}': {}", input, e)))
}
