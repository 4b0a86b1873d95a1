//! Safety checker
//!
//! Decides whether a validated snapshot admits a completion order for every
//! club, using the classic Banker's safe-sequence search.
//!
//! # Scan Loop
//!
//! ```text
//! work = available
//! repeat:
//!   scan clubs from index 0 upward
//!   first unfinished club whose need fits work:
//!     mark finished, append to sequence, release its allocation into work,
//!     restart the scan from index 0
//!   no club fits and some remain -> UNSAFE
//! all finished -> SAFE with the completion sequence
//! ```
//!
//! Restarting from index 0 after every success is the tie-break policy:
//! lower-indexed clubs always finish first when several qualify, so the
//! produced sequence is reproducible, not an accident of iteration order.
//!
//! # Critical Invariants
//!
//! 1. **Determinism**: identical input always yields the identical verdict
//!    and sequence
//! 2. **No Caller Mutation**: the scan works on private copies; the snapshot
//!    is never touched
//! 3. **Bounded Iteration**: every pass finishes at least one club or ends
//!    the search, so at most `num_clubs` passes run

use crate::models::ResourceState;
use serde::{Deserialize, Serialize};

/// Outcome of a safety check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyVerdict {
    /// A completion order exists; `sequence` lists club indices in the order
    /// they can finish
    Safe { sequence: Vec<usize> },

    /// No completion order exists from this snapshot
    Unsafe,
}

impl SafetyVerdict {
    /// True for [`SafetyVerdict::Safe`]
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe { .. })
    }

    /// The completion sequence, empty when unsafe
    pub fn sequence(&self) -> &[usize] {
        match self {
            SafetyVerdict::Safe { sequence } => sequence,
            SafetyVerdict::Unsafe => &[],
        }
    }
}

/// Run the safe-sequence search over a validated snapshot
///
/// The snapshot must have passed
/// [`validate_state`](crate::validation::validate_state); shapes are assumed
/// to agree and all quantities to be non-negative.
///
/// # Arguments
///
/// * `state` - Validated allocation snapshot
///
/// # Returns
///
/// - `SafetyVerdict::Safe { sequence }` if every club can run to completion
/// - `SafetyVerdict::Unsafe` if some subset can never be satisfied
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::{find_safe_sequence, ResourceState, SafetyVerdict};
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
/// let verdict = find_safe_sequence(&state);
/// assert_eq!(
///     verdict,
///     SafetyVerdict::Safe { sequence: vec![1, 3, 0, 2, 4] },
/// );
/// ```
pub fn find_safe_sequence(state: &ResourceState) -> SafetyVerdict {
    let num_clubs = state.num_clubs();
    let need = state.need_matrix();

    let mut work: Vec<i64> = state.available().to_vec();
    let mut finished = vec![false; num_clubs];
    let mut sequence = Vec::with_capacity(num_clubs);

    // Each iteration finishes exactly one club or returns, so the loop runs
    // at most num_clubs times.
    while sequence.len() < num_clubs {
        let candidate = (0..num_clubs).find(|&club| !finished[club] && fits(&need[club], &work));

        match candidate {
            Some(club) => {
                for (units, held) in work.iter_mut().zip(&state.allocation()[club]) {
                    *units += held;
                }
                finished[club] = true;
                sequence.push(club);
            }
            None => return SafetyVerdict::Unsafe,
        }
    }

    SafetyVerdict::Safe { sequence }
}

/// Component-wise `need <= work`
fn fits(need: &[i64], work: &[i64]) -> bool {
    need.iter().zip(work).all(|(n, w)| n <= w)
}
