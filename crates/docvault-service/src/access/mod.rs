//! Access history: recording actions and reading the audit trail.

pub mod history;
pub mod logger;

pub use history::HistoryService;
pub use logger::AccessLogger;
