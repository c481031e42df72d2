//! Core data models for the mission tracker
//!
//! This module contains the data structures of the accounting domain: money,
//! transactions, the ledger that owns them, and the 14-day mission cycle.

pub mod ids;
pub mod ledger;
pub mod mission;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use ledger::{Ledger, LedgerSnapshot};
pub use mission::{CycleState, DayReport, DayStatus, MissionCycle, MissionDay, CYCLE_DAYS};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
