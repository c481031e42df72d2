//! Ledger store
//!
//! Owns the running balance and the newest-first list of transactions.
//! The balance always equals the sum of surviving deposits minus surviving
//! withdrawals, on top of whatever balance the ledger was restored with.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::ids::TransactionId;
use super::mission::MissionDay;
use super::money::Money;
use super::transaction::{Transaction, TransactionKind};
use crate::error::{TrackerError, TrackerResult};

/// Read-only view of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub balance: Money,
    pub transactions: Vec<Transaction>,
}

/// Running balance plus transaction history
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balance: Money,
    /// Newest first
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger with a zero balance
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted or imported state
    ///
    /// The balance is taken as given; transactions must have positive amounts
    /// and unique ids.
    pub fn restore(balance: Money, transactions: Vec<Transaction>) -> TrackerResult<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            txn.validate()
                .map_err(|e| TrackerError::InvalidFormat(format!("transaction {}: {}", txn.id, e)))?;
            if !seen.insert(txn.id) {
                return Err(TrackerError::InvalidFormat(format!(
                    "duplicate transaction id {}",
                    txn.id
                )));
            }
        }
        Ok(Self {
            balance,
            transactions,
        })
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find a transaction by full id or short display form
    ///
    /// A short id shared by several transactions is an error rather than a
    /// guess.
    pub fn find(&self, identifier: &str) -> TrackerResult<&Transaction> {
        let mut matches = self.transactions.iter().filter(|t| t.id.matches(identifier));
        let first = matches
            .next()
            .ok_or_else(|| TrackerError::transaction_not_found(identifier))?;
        let others = matches.count();
        if others > 0 {
            return Err(TrackerError::AmbiguousId {
                identifier: identifier.to_string(),
                count: others + 1,
            });
        }
        Ok(first)
    }

    /// Record a deposit and return it
    pub fn apply_deposit(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
        mission_day: MissionDay,
    ) -> TrackerResult<Transaction> {
        require_positive(amount)?;
        self.push(Transaction::new(
            TransactionKind::Deposit,
            amount,
            description,
            occurred_at,
            mission_day,
        ))
    }

    /// Record a withdrawal and return it
    ///
    /// Fails without touching the balance if the amount isn't positive or
    /// exceeds the current balance.
    pub fn apply_withdrawal(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
        mission_day: MissionDay,
    ) -> TrackerResult<Transaction> {
        require_positive(amount)?;
        if amount > self.balance {
            return Err(TrackerError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.push(Transaction::new(
            TransactionKind::Withdrawal,
            amount,
            description,
            occurred_at,
            mission_day,
        ))
    }

    /// Undo a transaction's balance effect and remove it from the ledger
    pub fn reverse(&mut self, id: TransactionId) -> TrackerResult<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        let effect = self.transactions[position].balance_effect();
        self.balance = self
            .balance
            .checked_sub(effect)
            .ok_or_else(|| balance_overflow(effect))?;
        Ok(self.transactions.remove(position))
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balance: self.balance,
            transactions: self.transactions.clone(),
        }
    }

    fn push(&mut self, txn: Transaction) -> TrackerResult<Transaction> {
        let effect = txn.balance_effect();
        self.balance = self
            .balance
            .checked_add(effect)
            .ok_or_else(|| balance_overflow(effect))?;
        self.transactions.insert(0, txn.clone());
        Ok(txn)
    }
}

fn balance_overflow(effect: Money) -> TrackerError {
    TrackerError::InvalidAmount(format!("balance out of range after applying {}", effect))
}

fn require_positive(amount: Money) -> TrackerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TrackerError::InvalidAmount(format!(
            "amount must be greater than 0, got {}",
            amount
        )))
    }
}
