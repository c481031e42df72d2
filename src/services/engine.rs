//! Accounting engine
//!
//! The engine is the only thing that mutates the ledger and the mission
//! cycle, and it keeps the two consistent: a withdrawal is recorded in both
//! or in neither, and deleting it backs it out of both. Every mutating call
//! first reconciles the cycle against the clock (rolling over an expired
//! cycle), then applies the change, queues events and flushes a snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::events::EngineEvent;
use crate::clock::Clock;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    CycleState, DayReport, Ledger, MissionCycle, MissionDay, Money, Transaction, TransactionId,
};
use crate::storage::{KeyValueStore, StateStore, StateView};

/// Full read-only view of tracker state at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub balance: Money,
    pub daily_target: Money,
    pub transactions: Vec<Transaction>,
    pub mission: MissionCycle,
    pub current_day: MissionDay,
    pub todays_expenses: Money,
    pub available_today: Money,
}

/// What a clock reconciliation changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAdvance {
    /// Same cycle, same day
    Unchanged,
    /// Midnight passed within the cycle
    DayAdvanced { from: MissionDay, to: MissionDay },
    /// The cycle expired (or hadn't started yet) and was replaced
    RolledOver {
        previous_start: NaiveDate,
        start_date: NaiveDate,
    },
}

/// How today's spending compares to the daily target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressHealth {
    OnTrack,
    /// More than 80% of the target spent
    Warning,
    /// More than 100% of the target spent
    OverBudget,
}

/// Today's spending as a share of the daily target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingProgress {
    /// Zero when no target is set; may exceed 100
    pub percent: f64,
    pub health: ProgressHealth,
}

impl SpendingProgress {
    fn new(expenses: Money, target: Money) -> Self {
        let percent = if target.is_positive() {
            expenses.cents() as f64 / target.cents() as f64 * 100.0
        } else {
            0.0
        };
        let health = if percent > 100.0 {
            ProgressHealth::OverBudget
        } else if percent > 80.0 {
            ProgressHealth::Warning
        } else {
            ProgressHealth::OnTrack
        };
        Self { percent, health }
    }
}

/// State accepted by [`AccountingEngine::import`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedState {
    pub balance: Money,
    pub daily_target: Money,
    pub transactions: Vec<Transaction>,
    pub mission: MissionCycle,
}

/// Keeps the ledger and the mission cycle consistent
#[derive(Debug)]
pub struct AccountingEngine {
    ledger: Ledger,
    mission: MissionCycle,
    daily_target: Money,
    /// Day index observed at the last reconciliation
    last_day: MissionDay,
    store: StateStore,
    clock: Box<dyn Clock>,
    events: Vec<EngineEvent>,
}

impl AccountingEngine {
    /// Load state from `backend` and reconcile it with the clock
    ///
    /// Missing keys start out as defaults. A persisted cycle that has expired,
    /// or that starts after today, is rolled over before the engine is
    /// returned. Unreadable persisted values
    /// are a `Storage` error; nothing is discarded silently.
    pub fn open(backend: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> TrackerResult<Self> {
        let store = StateStore::new(backend);
        let persisted = store.load()?;
        let now = clock.now();

        let ledger = Ledger::restore(
            persisted.balance.unwrap_or_default(),
            persisted.transactions.unwrap_or_default(),
        )
        .map_err(|e| TrackerError::Storage(format!("Persisted ledger is invalid: {}", e)))?;

        let fresh_cycle = persisted.mission.is_none();
        let mission = match persisted.mission {
            Some(mission) => {
                mission.validate().map_err(|e| {
                    TrackerError::Storage(format!("Persisted mission is invalid: {}", e))
                })?;
                mission
            }
            None => MissionCycle::new(now.date_naive()),
        };

        let daily_target = persisted.daily_target.unwrap_or_default();
        if daily_target.is_negative() {
            return Err(TrackerError::Storage(format!(
                "Persisted daily target is negative: {}",
                daily_target
            )));
        }

        let last_day = mission.cached_day();
        let mut engine = Self {
            ledger,
            mission,
            daily_target,
            last_day,
            store,
            clock,
            events: Vec::new(),
        };

        let advance = engine.reconcile(now);
        tracing::info!(
            balance = %engine.ledger.balance(),
            transactions = engine.ledger.len(),
            start_date = %engine.mission.start_date(),
            day = %engine.last_day,
            "tracker state loaded"
        );

        if fresh_cycle || advance != ClockAdvance::Unchanged {
            engine.flush()?;
        }
        Ok(engine)
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn daily_target(&self) -> Money {
        self.daily_target
    }

    pub fn mission(&self) -> &MissionCycle {
        &self.mission
    }

    /// Transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Look a transaction up by full id or `txn-xxxxxxxx` display form
    pub fn find_transaction(&self, identifier: &str) -> TrackerResult<&Transaction> {
        self.ledger.find(identifier)
    }

    /// Record money coming in
    pub fn record_deposit(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> TrackerResult<Transaction> {
        self.advance_clock(now)?;

        let day = self.mission.current_day_index(now);
        let txn = self.ledger.apply_deposit(amount, description, now, day)?;

        tracing::info!(id = %txn.id, amount = %amount, day = %day, "deposit recorded");
        self.events.push(EngineEvent::TransactionAdded {
            transaction: txn.clone(),
        });
        self.push_balance_changed();
        self.flush()?;
        Ok(txn)
    }

    /// Record money going out, charged to today's mission bucket
    pub fn record_withdrawal(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> TrackerResult<Transaction> {
        self.advance_clock(now)?;

        let day = self.mission.current_day_index(now);
        let txn = self.ledger.apply_withdrawal(amount, description, now, day)?;

        if let Err(e) = self.mission.add_expense(day, amount) {
            // Back the ledger step out so neither side changes
            self.ledger.reverse(txn.id)?;
            return Err(e);
        }

        tracing::info!(id = %txn.id, amount = %amount, day = %day, "withdrawal recorded");
        self.events.push(EngineEvent::TransactionAdded {
            transaction: txn.clone(),
        });
        self.push_balance_changed();
        self.push_mission_changed();
        self.flush()?;
        Ok(txn)
    }

    /// Remove a transaction and undo its effects
    ///
    /// A withdrawal's expense is taken back out of the bucket recorded on the
    /// transaction itself. Withdrawals made before the current cycle started
    /// only restore the balance, since their bucket no longer exists.
    pub fn delete_transaction(
        &mut self,
        id: TransactionId,
        now: DateTime<Utc>,
    ) -> TrackerResult<Transaction> {
        self.advance_clock(now)?;

        let txn = self.ledger.reverse(id)?;
        let in_current_cycle = self.mission.contains(txn.date());

        if txn.is_withdrawal() && in_current_cycle {
            self.mission.reverse_expense(txn.mission_day, txn.amount);
            self.push_mission_changed();
        } else if txn.is_withdrawal() {
            tracing::debug!(id = %txn.id, "withdrawal predates current cycle; expenses untouched");
        }

        tracing::info!(id = %txn.id, kind = ?txn.kind, amount = %txn.amount, "transaction deleted");
        self.events.push(EngineEvent::TransactionRemoved {
            transaction: txn.clone(),
        });
        self.push_balance_changed();
        self.flush()?;
        Ok(txn)
    }

    /// Set the daily target and apply it from today to the end of the cycle
    pub fn set_daily_target(&mut self, value: Money, now: DateTime<Utc>) -> TrackerResult<()> {
        if !value.is_positive() {
            return Err(TrackerError::InvalidAmount(format!(
                "daily target must be greater than 0, got {}",
                value
            )));
        }
        self.advance_clock(now)?;

        let day = self.mission.current_day_index(now);
        self.daily_target = value;
        self.mission.set_target_from_day_forward(day, value);

        tracing::info!(target = %value, from_day = %day, "daily target set");
        self.push_mission_changed();
        self.flush()?;
        Ok(())
    }

    /// Reconcile the cycle with `now`, rolling over or advancing the day
    ///
    /// Flushes only when something changed.
    pub fn advance_clock(&mut self, now: DateTime<Utc>) -> TrackerResult<ClockAdvance> {
        let advance = self.reconcile(now);
        if advance != ClockAdvance::Unchanged {
            self.flush()?;
        }
        Ok(advance)
    }

    /// Expenses recorded against today's bucket
    pub fn todays_expenses(&self, now: DateTime<Utc>) -> Money {
        self.mission
            .expenses_for(self.mission.current_day_index(now))
    }

    /// What is left of today's target, never negative
    pub fn available_today(&self, now: DateTime<Utc>) -> Money {
        self.daily_target
            .saturating_sub_zero(self.todays_expenses(now))
    }

    pub fn spending_progress(&self, now: DateTime<Utc>) -> SpendingProgress {
        SpendingProgress::new(self.todays_expenses(now), self.daily_target)
    }

    /// One report per cycle day, for rendering the mission grid
    pub fn day_reports(&self, now: DateTime<Utc>) -> Vec<DayReport> {
        self.mission
            .day_reports(self.mission.current_day_index(now), self.daily_target)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> TrackerSnapshot {
        let mut mission = self.mission.clone();
        let current_day = mission.refresh_current_day(now);
        TrackerSnapshot {
            balance: self.ledger.balance(),
            daily_target: self.daily_target,
            transactions: self.ledger.transactions().to_vec(),
            mission,
            current_day,
            todays_expenses: self.todays_expenses(now),
            available_today: self.available_today(now),
        }
    }

    /// Replace all state with an imported document
    ///
    /// The document is validated in full before anything is replaced, so a
    /// rejected import leaves the engine untouched. A mission starting after
    /// today is rejected.
    pub fn import(&mut self, state: ImportedState, now: DateTime<Utc>) -> TrackerResult<()> {
        let ledger = Ledger::restore(state.balance, state.transactions)?;
        state.mission.validate().map_err(TrackerError::InvalidFormat)?;
        if state.mission.state(now) == CycleState::NotStarted {
            return Err(TrackerError::InvalidFormat(format!(
                "mission starts on {}, after today ({})",
                state.mission.start_date(),
                now.date_naive()
            )));
        }
        if state.daily_target.is_negative() {
            return Err(TrackerError::InvalidFormat(format!(
                "daily target cannot be negative: {}",
                state.daily_target
            )));
        }

        self.ledger = ledger;
        self.daily_target = state.daily_target;
        self.last_day = state.mission.cached_day();
        self.mission = state.mission;
        self.reconcile(now);

        tracing::info!(
            balance = %self.ledger.balance(),
            transactions = self.ledger.len(),
            start_date = %self.mission.start_date(),
            "state imported"
        );
        self.events.push(EngineEvent::StateImported {
            snapshot: Box::new(self.snapshot(now)),
        });
        self.flush()
    }

    /// Drain queued events, oldest first
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write the current state through the store
    pub fn flush(&mut self) -> TrackerResult<()> {
        self.store.save(StateView {
            balance: self.ledger.balance(),
            daily_target: self.daily_target,
            transactions: self.ledger.transactions(),
            mission: &self.mission,
        })
    }

    fn reconcile(&mut self, now: DateTime<Utc>) -> ClockAdvance {
        let state = self.mission.state(now);
        if state != CycleState::Active {
            // Not-yet-started cycles are replaced like expired ones
            if state == CycleState::NotStarted {
                tracing::warn!(
                    start_date = %self.mission.start_date(),
                    today = %now.date_naive(),
                    "mission cycle starts after today"
                );
            }
            let previous_start = self.mission.start_date();
            self.mission = self.mission.rollover(now.date_naive());
            self.last_day = self.mission.refresh_current_day(now);
            let start_date = self.mission.start_date();

            tracing::info!(%previous_start, %start_date, "mission cycle rolled over");
            self.events.push(EngineEvent::CycleRolledOver {
                previous_start,
                start_date,
            });
            self.push_mission_changed();
            return ClockAdvance::RolledOver {
                previous_start,
                start_date,
            };
        }

        let day = self.mission.refresh_current_day(now);
        if day == self.last_day {
            return ClockAdvance::Unchanged;
        }

        let from = self.last_day;
        self.last_day = day;
        tracing::debug!(%from, to = %day, "mission day advanced");
        self.events.push(EngineEvent::DayAdvanced { from, to: day });
        ClockAdvance::DayAdvanced { from, to: day }
    }

    fn push_balance_changed(&mut self) {
        self.events.push(EngineEvent::BalanceChanged {
            balance: self.ledger.balance(),
        });
    }

    fn push_mission_changed(&mut self) {
        self.events.push(EngineEvent::MissionChanged {
            mission: self.mission.clone(),
            daily_target: self.daily_target,
        });
    }
}
