//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Transaction, TransactionKind};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Day")]
    day: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &str, date_format: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: format!(
                "{} {}",
                txn.occurred_at.format(date_format),
                txn.occurred_at.format("%H:%M")
            ),
            kind: txn.kind.to_string(),
            description: truncate(&txn.description, 30),
            amount: signed_amount(txn, currency),
            day: format!("{}/14", txn.mission_day),
        }
    }
}

/// Amount with a sign showing its effect on the balance
fn signed_amount(txn: &Transaction, currency: &str) -> String {
    let sign = match txn.kind {
        TransactionKind::Deposit => '+',
        TransactionKind::Withdrawal => '-',
    };
    format!("{}{}", sign, txn.amount.format_with_symbol(currency))
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(
    transactions: &[&Transaction],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, currency, date_format));
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// One-line confirmation after recording a transaction
pub fn format_transaction_summary(txn: &Transaction, currency: &str) -> String {
    let label = if txn.description.is_empty() {
        txn.kind.default_description()
    } else {
        txn.description.as_str()
    };
    format!(
        "{} {} ({}) on mission day {} [{}]",
        txn.kind,
        signed_amount(txn, currency),
        label,
        txn.mission_day,
        txn.id
    )
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionDay, Money};
    use chrono::{TimeZone, Utc};

    fn txn(kind: TransactionKind, cents: i64, description: &str) -> Transaction {
        Transaction::new(
            kind,
            Money::from_cents(cents),
            description,
            Utc.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap(),
            MissionDay::new(4).unwrap(),
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_transaction_table(&[], "৳", "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_table_contents() {
        let deposit = txn(TransactionKind::Deposit, 10000, "Salary");
        let withdrawal = txn(TransactionKind::Withdrawal, 2550, "Groceries");
        let table = format_transaction_table(&[&withdrawal, &deposit], "$", "%Y-%m-%d");

        assert!(table.contains("Description"));
        assert!(table.contains("-$25.50"));
        assert!(table.contains("+$100.00"));
        assert!(table.contains("2025-03-04 09:15"));
        assert!(table.contains("4/14"));
        assert!(table.find("Groceries").unwrap() < table.find("Salary").unwrap());
    }

    #[test]
    fn test_summary_uses_default_description() {
        let summary = format_transaction_summary(&txn(TransactionKind::Withdrawal, 500, ""), "৳");
        assert!(summary.starts_with("Withdraw -৳5.00 (Expense) on mission day 4"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 10), "a much ...");
    }
}
