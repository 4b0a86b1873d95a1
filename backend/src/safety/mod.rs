//! Safety Module
//!
//! The decision core: safe-sequence search, request evaluation, and sequence
//! labelling.
//!
//! - Safety check: does a completion order exist for every club?
//! - Grant evaluation: guard a request, simulate it on a copy, accept only
//!   if the copy stays safe
//! - Labelling: club indices to display names for reports
//!
//! # Critical Invariants
//!
//! 1. **Determinism**: identical input produces the identical verdict and
//!    sequence (lowest-index-first tie-break)
//! 2. **No Caller Mutation**: evaluation works on private copies; a grant
//!    returns a fresh snapshot, a denial leaves everything as it was
//! 3. **Validated Input**: callers run
//!    [`validate_state`](crate::validation::validate_state) before invoking
//!    the checker or evaluator on untrusted matrices
//!
//! # Example
//!
//! ```rust
//! use bankers_core_rs::{ResourceRequest, ResourceState};
//! use bankers_core_rs::safety;
//!
//! let state = ResourceState::new(
//!     vec![vec![1, 0], vec![0, 1]],
//!     vec![vec![2, 1], vec![1, 2]],
//!     vec![2, 2],
//! );
//!
//! let verdict = safety::find_safe_sequence(&state);
//! assert!(verdict.is_safe());
//!
//! let decision = safety::evaluate_request(&state, &ResourceRequest::new(0, vec![1, 0]))
//!     .expect("well-formed request");
//! assert!(decision.is_granted());
//! ```

pub mod checker;
pub mod grant;
pub mod labels;

// Re-export public API
pub use checker::{find_safe_sequence, SafetyVerdict};
pub use grant::{evaluate_request, DenialReason, GrantDecision, RequestError};
pub use labels::{club_label, club_labels};
