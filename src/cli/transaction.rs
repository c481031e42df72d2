//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, Session};
use crate::display::{format_transaction_summary, format_transaction_table};
use crate::error::TrackerResult;
use crate::models::{Transaction, TransactionKind};
use crate::services::{history, HistoryFilter};

/// Ledger subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record money coming in
    Deposit {
        /// Amount (e.g. "100", "12.50", "৳40")
        amount: String,
        /// Description, defaults to "Deposit"
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Record an expense against today's mission budget
    #[command(alias = "withdrawal")]
    Withdraw {
        /// Amount (e.g. "30", "7.25")
        amount: String,
        /// Description, defaults to "Expense"
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a transaction and undo its effect
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID (full UUID or txn-xxxxxxxx)
        id: String,
    },
    /// Show transaction history
    History {
        /// all, deposits, withdrawals, today, week or month
        #[arg(short, long)]
        filter: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(session: &mut Session, cmd: TransactionCommands) -> TrackerResult<()> {
    match cmd {
        TransactionCommands::Deposit {
            amount,
            description,
        } => {
            let txn = record(session, TransactionKind::Deposit, &amount, description)?;
            println!("{}", format_transaction_summary(&txn, session.currency()));
            println!(
                "Balance: {}",
                session.engine.balance().format_with_symbol(session.currency())
            );
        }

        TransactionCommands::Withdraw {
            amount,
            description,
        } => {
            let txn = record(session, TransactionKind::Withdrawal, &amount, description)?;
            let now = session.engine.now();
            println!("{}", format_transaction_summary(&txn, session.currency()));
            println!(
                "Balance: {}  Available today: {}",
                session.engine.balance().format_with_symbol(session.currency()),
                session
                    .engine
                    .available_today(now)
                    .format_with_symbol(session.currency())
            );
        }

        TransactionCommands::Delete { id } => {
            let target = session.engine.find_transaction(&id)?.id;
            let now = session.engine.now();
            let txn = session.engine.delete_transaction(target, now)?;
            println!(
                "Deleted {} {} ({})",
                txn.kind,
                txn.amount.format_with_symbol(session.currency()),
                txn.id
            );
            println!(
                "Balance: {}",
                session.engine.balance().format_with_symbol(session.currency())
            );
        }

        TransactionCommands::History { filter, limit } => {
            let now = session.engine.now();
            let all = session.engine.transactions();

            let mut rows: Vec<&Transaction> = match filter {
                Some(filter) => filter.parse::<HistoryFilter>()?.apply(all, now),
                None => history::recent(all, session.settings.recent_transactions)
                    .iter()
                    .collect(),
            };
            if let Some(limit) = limit {
                rows.truncate(limit);
            }

            print!(
                "{}",
                format_transaction_table(&rows, session.currency(), &session.settings.date_format)
            );
            if rows.len() < all.len() {
                println!("Showing {} of {} transactions", rows.len(), all.len());
            }
        }
    }

    Ok(())
}

fn record(
    session: &mut Session,
    kind: TransactionKind,
    amount: &str,
    description: Option<String>,
) -> TrackerResult<Transaction> {
    let amount = parse_amount(amount)?;
    let description = description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| kind.default_description().to_string());
    let now = session.engine.now();

    match kind {
        TransactionKind::Deposit => session.engine.record_deposit(amount, description, now),
        TransactionKind::Withdrawal => session.engine.record_withdrawal(amount, description, now),
    }
}
