//! Decision journal
//!
//! Thread-safe, append-only audit trail of grant decisions. The journal is
//! owned by the service boundary (FFI engine, CLI run loop), never by the
//! decision core: `evaluate_request` and `find_safe_sequence` stay stateless
//! and a record exists only because a caller appended one.
//!
//! # Critical Invariants
//!
//! 1. **Append-Only**: records are never edited; `clear` (the reset
//!    operation) is the only removal
//! 2. **Thread-Safe**: interior `RwLock`, poisoning surfaces as
//!    [`JournalError::LockPoisoned`] instead of a panic
//! 3. **No Fabrication**: the journal never synthesizes entries; exporting
//!    an empty journal is an explicit [`JournalError::NothingToExport`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during journal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("Journal lock poisoned")]
    LockPoisoned,

    #[error("No decisions available to export")]
    NothingToExport,
}

/// Grant or deny, as recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Granted,
    Denied,
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionOutcome::Granted => write!(f, "GRANTED"),
            DecisionOutcome::Denied => write!(f, "DENIED"),
        }
    }
}

/// One journalled grant decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Unique record id (UUID v4)
    pub decision_id: String,

    /// When the decision was taken
    pub timestamp: DateTime<Utc>,

    /// Requesting club, by row index
    pub club_id: usize,

    /// Display label the club was reported under
    pub club_label: String,

    /// Requested units per resource type
    pub requested: Vec<i64>,

    /// Grant or deny
    pub outcome: DecisionOutcome,

    /// Human-readable outcome message
    pub message: String,

    /// Labelled completion sequence, empty for denials
    pub safe_sequence: Vec<String>,
}

impl DecisionRecord {
    /// Build a record stamped with a fresh id and the current time
    pub fn new(
        club_id: usize,
        club_label: String,
        requested: Vec<i64>,
        outcome: DecisionOutcome,
        message: String,
        safe_sequence: Vec<String>,
    ) -> Self {
        Self {
            decision_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            club_id,
            club_label,
            requested,
            outcome,
            message,
            safe_sequence,
        }
    }
}

/// Append-only store of grant decisions
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::{DecisionJournal, DecisionOutcome, DecisionRecord};
///
/// let journal = DecisionJournal::new();
/// assert!(journal.is_empty().unwrap());
///
/// journal
///     .append(DecisionRecord::new(
///         1,
///         "Music Club".to_string(),
///         vec![1, 0, 2],
///         DecisionOutcome::Granted,
///         "Request granted. System remains in a safe state.".to_string(),
///         vec!["Music Club".to_string(), "Club 3".to_string()],
///     ))
///     .unwrap();
///
/// assert_eq!(journal.len().unwrap(), 1);
/// let csv = journal.export_csv().unwrap();
/// assert!(csv.starts_with("Timestamp,Club Name,Requested Resources,Decision,Message,Safe Sequence"));
/// ```
#[derive(Debug)]
pub struct DecisionJournal {
    records: RwLock<Vec<DecisionRecord>>,
}

impl DecisionJournal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Append one decision record
    pub fn append(&self, record: DecisionRecord) -> Result<(), JournalError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| JournalError::LockPoisoned)?;
        records.push(record);
        Ok(())
    }

    /// Snapshot of all records in append order
    pub fn records(&self) -> Result<Vec<DecisionRecord>, JournalError> {
        let records = self.records.read().map_err(|_| JournalError::LockPoisoned)?;
        Ok(records.clone())
    }

    /// Number of records
    pub fn len(&self) -> Result<usize, JournalError> {
        let records = self.records.read().map_err(|_| JournalError::LockPoisoned)?;
        Ok(records.len())
    }

    /// True if no decision has been recorded
    pub fn is_empty(&self) -> Result<bool, JournalError> {
        Ok(self.len()? == 0)
    }

    /// Drop every record (the reset operation)
    pub fn clear(&self) -> Result<(), JournalError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| JournalError::LockPoisoned)?;
        records.clear();
        Ok(())
    }

    /// Render the journal as CSV
    ///
    /// Header row, then one line per record in append order. Commas inside
    /// the requested-vector rendering and the message become `;` so the
    /// column count stays fixed; an empty sequence renders as `N/A`.
    ///
    /// # Returns
    ///
    /// - `Ok(csv)` with a trailing newline
    /// - `Err(JournalError::NothingToExport)` when no records exist
    pub fn export_csv(&self) -> Result<String, JournalError> {
        let records = self.records()?;
        if records.is_empty() {
            return Err(JournalError::NothingToExport);
        }

        let mut csv =
            String::from("Timestamp,Club Name,Requested Resources,Decision,Message,Safe Sequence\n");

        for record in &records {
            let requested = format!("{:?}", record.requested).replace(',', ";");
            let message = record.message.replace(',', ";");
            let sequence = if record.safe_sequence.is_empty() {
                "N/A".to_string()
            } else {
                record.safe_sequence.join(" -> ")
            };

            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                record.timestamp.to_rfc3339(),
                record.club_label,
                requested,
                record.outcome,
                message,
                sequence
            ));
        }

        Ok(csv)
    }
}

impl Default for DecisionJournal {
    fn default() -> Self {
        Self::new()
    }
}
