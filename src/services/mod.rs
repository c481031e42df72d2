//! Service layer
//!
//! The accounting engine sits on top of the models and the storage layer;
//! history filters and the ticker are thin helpers around it.

pub mod engine;
pub mod events;
pub mod history;
pub mod ticker;

pub use engine::{
    AccountingEngine, ClockAdvance, ImportedState, ProgressHealth, SpendingProgress,
    TrackerSnapshot,
};
pub use events::EngineEvent;
pub use history::HistoryFilter;
pub use ticker::{TickOutcome, Ticker};
