//! Transaction history filters

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;
use crate::models::Transaction;

/// Which slice of the ledger to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Deposits,
    Withdrawals,
    /// Transactions dated today (UTC)
    Today,
    /// Since the most recent Sunday
    ThisWeek,
    /// Since the first of the month
    ThisMonth,
}

impl HistoryFilter {
    /// Apply to a newest-first ledger, keeping its order
    pub fn apply<'a>(&self, transactions: &'a [Transaction], now: DateTime<Utc>) -> Vec<&'a Transaction> {
        let today = now.date_naive();
        transactions
            .iter()
            .filter(|t| self.matches(t, today))
            .collect()
    }

    fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Deposits => txn.is_deposit(),
            Self::Withdrawals => txn.is_withdrawal(),
            Self::Today => txn.date() == today,
            Self::ThisWeek => txn.date() >= week_start(today),
            Self::ThisMonth => txn.date() >= today.with_day(1).unwrap_or(today),
        }
    }
}

/// First `n` transactions of a newest-first ledger
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_sunday() as i64)
}

impl FromStr for HistoryFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "deposit" | "deposits" => Ok(Self::Deposits),
            "withdraw" | "withdrawal" | "withdrawals" => Ok(Self::Withdrawals),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::ThisWeek),
            "month" => Ok(Self::ThisMonth),
            other => Err(TrackerError::InvalidFormat(format!(
                "Unknown history filter '{}'. Use all, deposits, withdrawals, today, week or month",
                other
            ))),
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Deposits => "deposits",
            Self::Withdrawals => "withdrawals",
            Self::Today => "today",
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
        };
        write!(f, "{}", name)
    }
}
