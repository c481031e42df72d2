//! Transaction model
//!
//! A ledger entry is either a deposit or a withdrawal. Each one remembers the
//! mission day it was recorded on so that deleting it later reverses the
//! right day's expense bucket, even after the clock has moved on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::mission::MissionDay;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the balance
    Deposit,
    /// Money spent from the balance
    Withdrawal,
}

impl TransactionKind {
    /// The effect an amount of this kind has on the balance
    pub fn balance_effect(&self, amount: Money) -> Money {
        match self {
            Self::Deposit => amount,
            Self::Withdrawal => -amount,
        }
    }

    /// Description used when the caller doesn't provide one
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdrawal => write!(f, "Withdraw"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Deposit or withdrawal
    pub kind: TransactionKind,

    /// Always positive; the direction comes from `kind`
    pub amount: Money,

    /// Free-text note
    #[serde(default)]
    pub description: String,

    /// When the transaction was recorded
    pub occurred_at: DateTime<Utc>,

    /// Mission day active when the transaction was recorded
    pub mission_day: MissionDay,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
        mission_day: MissionDay,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            description: description.into(),
            occurred_at,
            mission_day,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }

    /// Signed effect of this transaction on the balance
    pub fn balance_effect(&self) -> Money {
        self.kind.balance_effect(self.amount)
    }

    /// Calendar date (UTC) the transaction was recorded on
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_deposit() { '+' } else { '-' };
        write!(
            f,
            "{} {} {}{}",
            self.occurred_at.format("%Y-%m-%d %H:%M"),
            self.kind,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
