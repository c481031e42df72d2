//! Persistence adapter for tracker state
//!
//! Encodes the engine's state into four string entries:
//!
//! | key               | value                                  |
//! |-------------------|----------------------------------------|
//! | `balance`         | decimal text, e.g. `70.00`             |
//! | `daily_target`    | decimal text                           |
//! | `transactions`    | JSON array of transactions             |
//! | `current_mission` | JSON object describing the 14-day cycle |

use serde::de::DeserializeOwned;

use super::kv::KeyValueStore;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{MissionCycle, Money, Transaction};

pub const BALANCE_KEY: &str = "balance";
pub const DAILY_TARGET_KEY: &str = "daily_target";
pub const TRANSACTIONS_KEY: &str = "transactions";
pub const MISSION_KEY: &str = "current_mission";

/// State as read back from the store; absent keys are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub balance: Option<Money>,
    pub daily_target: Option<Money>,
    pub transactions: Option<Vec<Transaction>>,
    pub mission: Option<MissionCycle>,
}

/// Borrowed view of the state to write
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub balance: Money,
    pub daily_target: Money,
    pub transactions: &'a [Transaction],
    pub mission: &'a MissionCycle,
}

/// Reads and writes tracker state through a key-value backend
#[derive(Debug)]
pub struct StateStore {
    backend: Box<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load whatever state is stored
    ///
    /// A present but unreadable value is an error rather than a silent reset.
    pub fn load(&self) -> TrackerResult<PersistedState> {
        let balance = self
            .backend
            .get(BALANCE_KEY)?
            .map(|raw| parse_money(BALANCE_KEY, &raw))
            .transpose()?;
        let daily_target = self
            .backend
            .get(DAILY_TARGET_KEY)?
            .map(|raw| parse_money(DAILY_TARGET_KEY, &raw))
            .transpose()?;
        let transactions = self
            .backend
            .get(TRANSACTIONS_KEY)?
            .map(|raw| parse_json(TRANSACTIONS_KEY, &raw))
            .transpose()?;
        let mission = self
            .backend
            .get(MISSION_KEY)?
            .map(|raw| parse_json(MISSION_KEY, &raw))
            .transpose()?;

        Ok(PersistedState {
            balance,
            daily_target,
            transactions,
            mission,
        })
    }

    /// Write a full snapshot in one batch
    pub fn save(&mut self, state: StateView<'_>) -> TrackerResult<()> {
        let transactions = serde_json::to_string(state.transactions)?;
        let mission = serde_json::to_string(state.mission)?;

        self.backend.set_many(vec![
            (BALANCE_KEY, state.balance.to_string()),
            (DAILY_TARGET_KEY, state.daily_target.to_string()),
            (TRANSACTIONS_KEY, transactions),
            (MISSION_KEY, mission),
        ])?;

        tracing::debug!(
            balance = %state.balance,
            transactions = state.transactions.len(),
            "state flushed"
        );
        Ok(())
    }
}

fn parse_money(key: &str, raw: &str) -> TrackerResult<Money> {
    Money::parse(raw)
        .map_err(|e| TrackerError::Storage(format!("Corrupt value for '{}': {}", key, e)))
}

fn parse_json<T: DeserializeOwned>(key: &str, raw: &str) -> TrackerResult<T> {
    serde_json::from_str(raw)
        .map_err(|e| TrackerError::Storage(format!("Corrupt value for '{}': {}", key, e)))
}
