//! Mission cycle model
//!
//! A mission is a fixed 14-day budgeting window. Each day has a spending
//! target and an accumulated expense total. The current day is always derived
//! from the start date and the clock; the copy stored in the record is only a
//! cache that gets overwritten on read-through.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Number of days in a mission cycle
pub const CYCLE_DAYS: usize = 14;

/// 1-based day index within a mission cycle (always in `1..=14`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MissionDay(u8);

impl MissionDay {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(CYCLE_DAYS as u8);

    /// Create a mission day, returning `None` outside `1..=14`
    pub fn new(day: u8) -> Option<Self> {
        (1..=CYCLE_DAYS as u8).contains(&day).then_some(Self(day))
    }

    /// Day index for a number of elapsed whole days, clamped to `1..=14`
    pub fn from_elapsed(elapsed_days: i64) -> Self {
        let day = elapsed_days.saturating_add(1).clamp(1, CYCLE_DAYS as i64);
        Self(day as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the per-day arrays
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All days of a cycle in order
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=CYCLE_DAYS as u8).map(Self)
    }
}

impl Default for MissionDay {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for MissionDay {
    type Error = String;

    fn try_from(day: u8) -> Result<Self, Self::Error> {
        Self::new(day).ok_or_else(|| format!("mission day must be 1..={}, got {}", CYCLE_DAYS, day))
    }
}

impl From<MissionDay> for u8 {
    fn from(day: MissionDay) -> Self {
        day.0
    }
}

impl fmt::Display for MissionDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a cycle relative to a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// The start date is still in the future
    NotStarted,
    /// Fewer than 14 whole days have elapsed since the start date
    Active,
    /// 14 or more whole days have elapsed; the only valid move is a rollover
    Expired,
}

/// How a single day of the cycle is going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The current day
    Today,
    /// A past day that stayed within a non-zero target
    Completed,
    /// A past day whose expenses exceeded its target
    OverBudget,
    /// A past day with no target and no overspend
    Unset,
    /// A day that hasn't started yet
    Future,
}

/// Per-day summary used to render the mission grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub day: MissionDay,
    pub date: NaiveDate,
    pub target: Money,
    pub expenses: Money,
    pub status: DayStatus,
}

/// The current 14-day budget cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionCycle {
    /// Day 1 of the cycle
    start_date: NaiveDate,

    /// Cached day index; recomputed from `start_date` whenever it's read
    #[serde(default)]
    current_day: MissionDay,

    /// Spending target per day
    daily_targets: [Money; CYCLE_DAYS],

    /// Accumulated withdrawals per day, never negative
    daily_expenses: [Money; CYCLE_DAYS],

    /// Informational aggregate fixed at creation
    #[serde(default)]
    total_target: Money,
}

impl MissionCycle {
    /// Start a fresh cycle on the given day
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            current_day: MissionDay::FIRST,
            daily_targets: [Money::zero(); CYCLE_DAYS],
            daily_expenses: [Money::zero(); CYCLE_DAYS],
            total_target: Money::zero(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last calendar day of the nominal cycle (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(CYCLE_DAYS as i64 - 1)
    }

    /// Calendar date of a given cycle day
    pub fn date_of(&self, day: MissionDay) -> NaiveDate {
        self.start_date + Duration::days(day.index() as i64)
    }

    /// Check if a date falls within the nominal cycle window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }

    /// The cached day index as last reconciled
    pub fn cached_day(&self) -> MissionDay {
        self.current_day
    }

    pub fn daily_targets(&self) -> &[Money; CYCLE_DAYS] {
        &self.daily_targets
    }

    pub fn daily_expenses(&self) -> &[Money; CYCLE_DAYS] {
        &self.daily_expenses
    }

    pub fn total_target(&self) -> Money {
        self.total_target
    }

    pub fn target_for(&self, day: MissionDay) -> Money {
        self.daily_targets[day.index()]
    }

    pub fn expenses_for(&self, day: MissionDay) -> Money {
        self.daily_expenses[day.index()]
    }

    /// Whole days elapsed between UTC midnight of the start date and `now`
    ///
    /// Negative when `now` is before the start date.
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> i64 {
        (now.date_naive() - self.start_date).num_days()
    }

    /// Current day of the cycle, clamped to `1..=14`
    pub fn current_day_index(&self, now: DateTime<Utc>) -> MissionDay {
        MissionDay::from_elapsed(self.elapsed_days(now))
    }

    /// True once 14 or more whole days have elapsed
    pub fn needs_rollover(&self, now: DateTime<Utc>) -> bool {
        self.elapsed_days(now) >= CYCLE_DAYS as i64
    }

    pub fn state(&self, now: DateTime<Utc>) -> CycleState {
        match self.elapsed_days(now) {
            elapsed if elapsed < 0 => CycleState::NotStarted,
            elapsed if elapsed >= CYCLE_DAYS as i64 => CycleState::Expired,
            _ => CycleState::Active,
        }
    }

    /// Build the replacement for this cycle, starting today
    pub fn rollover(&self, today: NaiveDate) -> Self {
        tracing::debug!(
            previous_start = %self.start_date,
            new_start = %today,
            "rolling mission cycle over"
        );
        Self::new(today)
    }

    /// Overwrite the cached day index with the one derived from `now`
    pub fn refresh_current_day(&mut self, now: DateTime<Utc>) -> MissionDay {
        self.current_day = self.current_day_index(now);
        self.current_day
    }

    /// Add a withdrawal amount to a day's expense bucket
    pub fn add_expense(&mut self, day: MissionDay, amount: Money) -> TrackerResult<()> {
        if !amount.is_positive() {
            return Err(TrackerError::InvalidAmount(format!(
                "expense must be greater than 0, got {}",
                amount
            )));
        }
        let bucket = &mut self.daily_expenses[day.index()];
        *bucket = bucket.checked_add(amount).ok_or_else(|| {
            TrackerError::InvalidAmount(format!(
                "expenses for mission day {} out of range after adding {}",
                day, amount
            ))
        })?;
        Ok(())
    }

    /// Remove a withdrawal amount from a day's expense bucket
    ///
    /// The bucket is floored at zero, so a reversal that exceeds what was
    /// recorded is absorbed silently.
    pub fn reverse_expense(&mut self, day: MissionDay, amount: Money) {
        let bucket = &mut self.daily_expenses[day.index()];
        *bucket = bucket.saturating_sub_zero(amount);
    }

    /// Set the target for `from` and every later day of the cycle
    pub fn set_target_from_day_forward(&mut self, from: MissionDay, value: Money) {
        for target in &mut self.daily_targets[from.index()..] {
            *target = value;
        }
    }

    /// Per-day summary relative to `current`
    ///
    /// Days without their own target fall back to `fallback_target`.
    pub fn day_reports(&self, current: MissionDay, fallback_target: Money) -> Vec<DayReport> {
        MissionDay::all()
            .map(|day| {
                let expenses = self.expenses_for(day);
                let own_target = self.target_for(day);
                let target = if own_target.is_zero() {
                    fallback_target
                } else {
                    own_target
                };

                let status = if day == current {
                    DayStatus::Today
                } else if day > current {
                    DayStatus::Future
                } else if expenses > target {
                    DayStatus::OverBudget
                } else if target.is_positive() {
                    DayStatus::Completed
                } else {
                    DayStatus::Unset
                };

                DayReport {
                    day,
                    date: self.date_of(day),
                    target,
                    expenses,
                    status,
                }
            })
            .collect()
    }

    /// Check a deserialized cycle for values the model never produces
    pub fn validate(&self) -> Result<(), String> {
        if let Some(day) = MissionDay::all().find(|d| self.expenses_for(*d).is_negative()) {
            return Err(format!("negative expenses on mission day {}", day));
        }
        if let Some(day) = MissionDay::all().find(|d| self.target_for(*d).is_negative()) {
            return Err(format!("negative target on mission day {}", day));
        }
        Ok(())
    }
}
