//! CSV export of the ledger
//!
//! One row per transaction, newest first. Amounts are signed so the column
//! sums to the net change in balance.

use std::io::Write;

use crate::error::TrackerResult;
use crate::models::Transaction;

const HEADER: [&str; 6] = ["ID", "Date", "Time", "Kind", "Description", "Amount"];

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> TrackerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    for txn in transactions {
        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.occurred_at.format("%Y-%m-%d").to_string(),
            txn.occurred_at.format("%H:%M:%S").to_string(),
            txn.kind.to_string(),
            txn.description.clone(),
            txn.balance_effect().to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionDay, Money, TransactionKind};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_csv_rows() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 14, 5, 0).unwrap();
        let transactions = vec![
            Transaction::new(
                TransactionKind::Withdrawal,
                Money::from_cents(1250),
                "Coffee, large",
                at,
                MissionDay::FIRST,
            ),
            Transaction::new(
                TransactionKind::Deposit,
                Money::from_cents(10000),
                "",
                at,
                MissionDay::FIRST,
            ),
        ];

        let mut buffer = Vec::new();
        export_transactions_csv(&transactions, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "ID,Date,Time,Kind,Description,Amount");
        assert!(lines[1].ends_with(",2025-03-01,14:05:00,Withdraw,\"Coffee, large\",-12.50"));
        assert!(lines[2].ends_with(",Deposit,,100.00"));
        assert_eq!(lines.len(), 3);
    }
}
