//! Domain models for the allocation checker

pub mod journal;
pub mod request;
pub mod state;

// Re-exports
pub use journal::{DecisionJournal, DecisionOutcome, DecisionRecord, JournalError};
pub use request::ResourceRequest;
pub use state::ResourceState;
