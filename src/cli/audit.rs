//! Audit log CLI commands

use clap::Subcommand;

use super::Session;
use crate::error::TrackerResult;

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

pub fn handle_audit_command(session: &Session, cmd: AuditCommands) -> TrackerResult<()> {
    match cmd {
        AuditCommands::Log { limit } => {
            let entries = session.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }
    Ok(())
}
