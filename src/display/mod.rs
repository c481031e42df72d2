//! Display formatting for terminal output

pub mod mission;
pub mod transaction;

pub use mission::{format_mission_grid, format_status};
pub use transaction::{format_transaction_summary, format_transaction_table};
