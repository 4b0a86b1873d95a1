//! Resource Allocation Core - Rust Engine
//!
//! Deadlock-avoiding resource grant checker built on the classic Banker's
//! algorithm: clubs declare maximum needs up front, and a request is granted
//! only when the resulting state still admits a completion order for every
//! club.
//!
//! # Architecture
//!
//! - **models**: Domain types (ResourceState, ResourceRequest, DecisionJournal)
//! - **validation**: Shape and invariant gate for untrusted snapshots
//! - **safety**: Safe-sequence search, request evaluation, sequence labels
//! - **scenarios**: Named demo states
//!
//! # Critical Invariants
//!
//! 1. All resource quantities are i64 units
//! 2. Decisions are deterministic (lowest-index-first tie-break)
//! 3. Evaluation never mutates caller state; grants return fresh snapshots
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod models;
pub mod safety;
pub mod scenarios;
pub mod validation;

// Re-exports for convenience
pub use models::{
    journal::{DecisionJournal, DecisionOutcome, DecisionRecord, JournalError},
    request::ResourceRequest,
    state::ResourceState,
};
pub use safety::{
    club_label, club_labels, evaluate_request, find_safe_sequence, DenialReason, GrantDecision,
    RequestError, SafetyVerdict,
};
pub use scenarios::{load_scenario, Scenario, SCENARIO_NAMES};
pub use validation::{validate_state, MatrixKind, ValidationError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn bankers_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyAllocationEngine>()?;
    Ok(())
}
