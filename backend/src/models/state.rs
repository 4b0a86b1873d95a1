//! Resource State
//!
//! Snapshot of the allocation system at one decision point: who holds what,
//! who may still ask for what, and what remains in the shared pool. Clubs
//! and resource types are identified purely by position; display names are
//! an external annotation.
//!
//! # Critical Invariants
//!
//! 1. **Shape Agreement**: allocation and max-need have one row per club and
//!    one column per resource type, matching the available vector's length
//! 2. **Bounded Allocation**: `allocation[i][j] <= max_need[i][j]` for all cells
//! 3. **Non-Negativity**: every cell and every available entry is `>= 0`
//! 4. **Value Semantics**: simulation produces a new state, never mutates in
//!    place, so the pre-decision snapshot stays intact for comparison
//!
//! Invariants 1-3 hold only after [`validate_state`](crate::validation::validate_state)
//! has accepted the snapshot; construction itself is total.

use serde::{Deserialize, Serialize};

/// Complete allocation snapshot for one safety or grant evaluation
///
/// All quantities are `i64` units so that negative values arriving in
/// untrusted input are representable and can be rejected by the validator
/// instead of wrapping.
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::ResourceState;
///
/// let state = ResourceState::new(
///     vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]],
///     vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2]],
///     vec![3, 3, 2],
/// );
///
/// assert_eq!(state.num_clubs(), 3);
/// assert_eq!(state.num_resources(), 3);
/// assert_eq!(state.need_matrix(), vec![
///     vec![7, 4, 3],
///     vec![1, 2, 2],
///     vec![6, 0, 0],
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Units of resource `j` currently held by club `i`
    allocation: Vec<Vec<i64>>,

    /// Maximum units of resource `j` club `i` may ever need
    max_need: Vec<Vec<i64>>,

    /// Unallocated units per resource type
    available: Vec<i64>,
}

impl ResourceState {
    /// Create a snapshot from caller-supplied matrices and pool vector
    ///
    /// No validation happens here; run
    /// [`validate_state`](crate::validation::validate_state) before handing
    /// the snapshot to the safety checker or request evaluator.
    pub fn new(allocation: Vec<Vec<i64>>, max_need: Vec<Vec<i64>>, available: Vec<i64>) -> Self {
        Self {
            allocation,
            max_need,
            available,
        }
    }

    /// Number of clubs (rows)
    pub fn num_clubs(&self) -> usize {
        self.allocation.len()
    }

    /// Number of resource types (length of the available vector)
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Get reference to the allocation matrix
    pub fn allocation(&self) -> &[Vec<i64>] {
        &self.allocation
    }

    /// Get reference to the max-need matrix
    pub fn max_need(&self) -> &[Vec<i64>] {
        &self.max_need
    }

    /// Get reference to the available vector
    pub fn available(&self) -> &[i64] {
        &self.available
    }

    /// Derive the need matrix: `need[i][j] = max_need[i][j] - allocation[i][j]`
    ///
    /// Never stored, always recomputed from the two source matrices. For a
    /// validated snapshot every cell is non-negative.
    pub fn need_matrix(&self) -> Vec<Vec<i64>> {
        self.max_need
            .iter()
            .zip(&self.allocation)
            .map(|(max_row, alloc_row)| {
                max_row
                    .iter()
                    .zip(alloc_row)
                    .map(|(max, alloc)| max - alloc)
                    .collect()
            })
            .collect()
    }

    /// Derive one club's need row, or `None` if the index is out of range
    pub fn need_row(&self, club: usize) -> Option<Vec<i64>> {
        let max_row = self.max_need.get(club)?;
        let alloc_row = self.allocation.get(club)?;
        Some(
            max_row
                .iter()
                .zip(alloc_row)
                .map(|(max, alloc)| max - alloc)
                .collect(),
        )
    }

    /// Produce the post-grant snapshot for a request, leaving `self` untouched
    ///
    /// The requesting club's allocation row gains `request` component-wise
    /// and the available vector loses it. Callers must have run the request
    /// guards first (see [`evaluate_request`](crate::safety::evaluate_request));
    /// this method applies blindly.
    ///
    /// # Panics
    ///
    /// Panics if `club` is out of range.
    pub fn with_request_applied(&self, club: usize, request: &[i64]) -> Self {
        let mut allocation = self.allocation.clone();
        for (cell, units) in allocation[club].iter_mut().zip(request) {
            *cell += units;
        }

        let available = self
            .available
            .iter()
            .zip(request)
            .map(|(have, units)| have - units)
            .collect();

        Self {
            allocation,
            max_need: self.max_need.clone(),
            available,
        }
    }
}
