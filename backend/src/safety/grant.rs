//! Request evaluator
//!
//! Grant pipeline for a single club's resource request.
//!
//! # Grant Flow
//!
//! ```text
//! request -> need guard -> pool guard -> simulate on copy -> safety check
//!                |              |                                 |
//!            deny (need)   deny (pool)                   grant / deny (unsafe)
//! ```
//!
//! A denial is a normal decision with a reason, not an error; errors are
//! reserved for malformed requests that bypassed client-side checks (wrong
//! vector length, unknown club, negative units).
//!
//! # Critical Invariants
//!
//! 1. **Atomicity**: a request is granted in full or not at all, never
//!    partially
//! 2. **No Mutation on Deny**: the caller's snapshot is untouched whatever
//!    the outcome; a grant returns a new snapshot instead of editing the old
//! 3. **One Decision per Call**: no retries, no batching; callers apply
//!    requests one at a time against the state the previous decision produced

use crate::models::{ResourceRequest, ResourceState};
use crate::safety::checker::{find_safe_sequence, SafetyVerdict};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed request input, distinct from a denial
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Club index {club} is out of range for {num_clubs} clubs")]
    UnknownClub { club: usize, num_clubs: usize },

    #[error("Request names {got} resource types, state has {expected}")]
    ResourceCountMismatch { got: usize, expected: usize },

    #[error("Requested units cannot be negative (resource {resource})")]
    NegativeUnits { resource: usize },
}

/// Why a well-formed request was denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// `request[j] > need[club][j]` for resource `j`
    ExceedsDeclaredNeed { club: usize, resource: usize },

    /// `request[j] > available[j]` for resource `j`
    ExceedsAvailable { resource: usize },

    /// The post-grant state fails the safety check
    WouldBeUnsafe,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::ExceedsDeclaredNeed { club, resource } => write!(
                f,
                "Request exceeds declared maximum need for club {} (resource {})",
                club, resource
            ),
            DenialReason::ExceedsAvailable { resource } => write!(
                f,
                "Insufficient available resources (resource {}). Request denied.",
                resource
            ),
            DenialReason::WouldBeUnsafe => write!(
                f,
                "Granting the request would lead to an unsafe state (potential deadlock)"
            ),
        }
    }
}

/// Outcome of one grant evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GrantDecision {
    /// Request committed; `new_state` is the post-grant snapshot the caller
    /// should persist, `sequence` the completion order proving it safe
    Granted {
        sequence: Vec<usize>,
        new_state: ResourceState,
    },

    /// Request refused; the pre-request snapshot remains canonical
    Denied { reason: DenialReason },
}

impl GrantDecision {
    /// True for [`GrantDecision::Granted`]
    pub fn is_granted(&self) -> bool {
        matches!(self, GrantDecision::Granted { .. })
    }

    /// Human-readable outcome message
    pub fn message(&self) -> String {
        match self {
            GrantDecision::Granted { .. } => {
                "Request granted. System remains in a safe state.".to_string()
            }
            GrantDecision::Denied { reason } => reason.to_string(),
        }
    }

    /// The proving sequence, empty for denials
    pub fn sequence(&self) -> &[usize] {
        match self {
            GrantDecision::Granted { sequence, .. } => sequence,
            GrantDecision::Denied { .. } => &[],
        }
    }
}

/// Evaluate a single resource request against a validated snapshot
///
/// Guards run in order: the request must fit the club's remaining need, then
/// the available pool. Only then is the grant simulated on a copy and the
/// copy checked for safety. The caller's snapshot is never modified; a grant
/// hands back the simulated snapshot as the new canonical state.
///
/// # Arguments
///
/// * `state` - Validated pre-request snapshot
/// * `request` - The club's request vector
///
/// # Returns
///
/// - `Ok(GrantDecision::Granted { .. })` with the proving sequence and
///   post-grant snapshot
/// - `Ok(GrantDecision::Denied { .. })` with the reason
/// - `Err(RequestError)` if the request itself is malformed
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::{evaluate_request, GrantDecision, ResourceRequest, ResourceState};
///
/// let state = ResourceState::new(
///     vec![
///         vec![0, 1, 0],
///         vec![2, 0, 0],
///         vec![3, 0, 2],
///         vec![2, 1, 1],
///         vec![0, 0, 2],
///     ],
///     vec![
///         vec![7, 5, 3],
///         vec![3, 2, 2],
///         vec![9, 0, 2],
///         vec![2, 2, 2],
///         vec![4, 3, 3],
///     ],
///     vec![3, 3, 2],
/// );
///
/// // Club 1 asks for one unit of resource 0 and two of resource 2.
/// let request = ResourceRequest::new(1, vec![1, 0, 2]);
/// let decision = evaluate_request(&state, &request).unwrap();
///
/// assert!(decision.is_granted());
/// assert_eq!(decision.sequence(), &[1, 3, 0, 2, 4]);
/// match decision {
///     GrantDecision::Granted { new_state, .. } => {
///         assert_eq!(new_state.available(), &[2, 3, 0]);
///         assert_eq!(new_state.allocation()[1], vec![3, 0, 2]);
///     }
///     GrantDecision::Denied { .. } => unreachable!(),
/// }
/// ```
pub fn evaluate_request(
    state: &ResourceState,
    request: &ResourceRequest,
) -> Result<GrantDecision, RequestError> {
    let club = request.club_id;
    let num_clubs = state.num_clubs();

    let need = state
        .need_row(club)
        .ok_or(RequestError::UnknownClub { club, num_clubs })?;

    let expected = state.num_resources();
    if request.resources.len() != expected {
        return Err(RequestError::ResourceCountMismatch {
            got: request.resources.len(),
            expected,
        });
    }
    if let Some(resource) = request.resources.iter().position(|units| *units < 0) {
        return Err(RequestError::NegativeUnits { resource });
    }

    // Guard 1: within the club's declared remaining need
    if let Some(resource) = request
        .resources
        .iter()
        .zip(&need)
        .position(|(asked, need)| asked > need)
    {
        return Ok(GrantDecision::Denied {
            reason: DenialReason::ExceedsDeclaredNeed { club, resource },
        });
    }

    // Guard 2: within the available pool
    if let Some(resource) = request
        .resources
        .iter()
        .zip(state.available())
        .position(|(asked, have)| asked > have)
    {
        return Ok(GrantDecision::Denied {
            reason: DenialReason::ExceedsAvailable { resource },
        });
    }

    // Simulate on a copy; the caller's snapshot stays intact either way
    let simulated = state.with_request_applied(club, &request.resources);

    match find_safe_sequence(&simulated) {
        SafetyVerdict::Safe { sequence } => Ok(GrantDecision::Granted {
            sequence,
            new_state: simulated,
        }),
        SafetyVerdict::Unsafe => Ok(GrantDecision::Denied {
            reason: DenialReason::WouldBeUnsafe,
        }),
    }
}
