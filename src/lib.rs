//! Mission Tracker - balance tracking with a rolling 14-day spending mission
//!
//! Records deposits and withdrawals against a running balance and keeps a
//! 14-day "mission" cycle with a per-day spending target. The current day of
//! the cycle is always derived from its start date and the clock; an expired
//! cycle is replaced by a fresh one starting today.
//!
//! # Architecture
//!
//! - `models`: money, transactions, the ledger and the mission cycle
//! - `services`: the accounting engine that keeps ledger and mission in
//!   step, plus history filters and the periodic ticker
//! - `storage`: key-value persistence (in memory or a JSON file)
//! - `clock`: injectable time source
//! - `config`: data directory and user settings
//! - `audit`: append-only log of engine events
//! - `export`: JSON, YAML and CSV export and import
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust
//! use mission_tracker::clock::ManualClock;
//! use mission_tracker::models::Money;
//! use mission_tracker::services::AccountingEngine;
//! use mission_tracker::storage::MemoryStore;
//! use chrono::{TimeZone, Utc};
//!
//! let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
//! let mut engine =
//!     AccountingEngine::open(Box::new(MemoryStore::new()), Box::new(clock.clone())).unwrap();
//!
//! let now = engine.now();
//! engine.record_deposit(Money::from_cents(10_000), "Salary", now).unwrap();
//! engine.record_withdrawal(Money::from_cents(3_000), "Food", now).unwrap();
//! assert_eq!(engine.balance(), Money::from_cents(7_000));
//! assert_eq!(engine.todays_expenses(now), Money::from_cents(3_000));
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
