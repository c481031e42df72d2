//! Audit logging
//!
//! Engine events drained by the front end are turned into [`AuditEntry`]
//! records and appended to `audit.log` as line-delimited JSON.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! let now = engine.now();
//! let entries: Vec<_> = engine
//!     .take_events()
//!     .iter()
//!     .map(|event| AuditEntry::from_event(event, now))
//!     .collect();
//! logger.log_batch(&entries)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
