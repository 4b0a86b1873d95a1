//! Input validation
//!
//! Gate that every untrusted snapshot must pass before the safety checker or
//! request evaluator runs. Checks are ordered and short-circuit on the first
//! failure, so callers always see the earliest violated rule:
//!
//! 1. Allocation and max-need describe the same number of clubs
//! 2. At least one club exists
//! 3. Every row of both matrices matches the available vector's length
//!    (ragged rows are a shape error, not silently truncated)
//! 4. No allocation cell exceeds its declared max need
//! 5. No matrix cell is negative
//! 6. No available entry is negative

use crate::models::ResourceState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which source matrix a shape or negativity error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixKind {
    Allocation,
    MaxNeed,
}

impl std::fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixKind::Allocation => write!(f, "allocation"),
            MatrixKind::MaxNeed => write!(f, "max-need"),
        }
    }
}

/// Reasons a snapshot fails validation
///
/// The first two variants are shape errors in the strict sense (mismatched
/// dimensions, empty club set); the rest are invariant violations. Both
/// classes are fatal to the request that carried the snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Allocation and max-need matrices must describe the same number of clubs (allocation has {allocation_rows}, max-need has {max_need_rows})")]
    ClubCountMismatch {
        allocation_rows: usize,
        max_need_rows: usize,
    },

    #[error("At least one club is required")]
    NoClubs,

    #[error("{matrix} row {club} has {row_len} resource entries, expected {expected}")]
    ShapeMismatch {
        matrix: MatrixKind,
        club: usize,
        row_len: usize,
        expected: usize,
    },

    #[error("Allocation exceeds max need for club {club}, resource {resource}")]
    AllocationExceedsMax { club: usize, resource: usize },

    #[error("{matrix} value cannot be negative (club {club}, resource {resource})")]
    NegativeCell {
        matrix: MatrixKind,
        club: usize,
        resource: usize,
    },

    #[error("Available resources cannot be negative (resource {resource})")]
    NegativeAvailable { resource: usize },
}

/// Validate a snapshot against all six rules, first failure wins
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::{validate_state, ResourceState, ValidationError};
///
/// let good = ResourceState::new(
///     vec![vec![0, 1], vec![1, 0]],
///     vec![vec![2, 1], vec![1, 3]],
///     vec![1, 1],
/// );
/// assert!(validate_state(&good).is_ok());
///
/// let negative = ResourceState::new(
///     vec![vec![0, 1], vec![1, 0]],
///     vec![vec![2, 1], vec![1, 3]],
///     vec![1, -1],
/// );
/// assert_eq!(
///     validate_state(&negative),
///     Err(ValidationError::NegativeAvailable { resource: 1 }),
/// );
/// ```
pub fn validate_state(state: &ResourceState) -> Result<(), ValidationError> {
    check_club_counts(state)?;
    check_shapes(state)?;
    check_allocation_bounds(state)?;
    check_cell_signs(state)?;
    check_available_signs(state)?;
    Ok(())
}

fn check_club_counts(state: &ResourceState) -> Result<(), ValidationError> {
    let allocation_rows = state.allocation().len();
    let max_need_rows = state.max_need().len();

    if allocation_rows != max_need_rows {
        return Err(ValidationError::ClubCountMismatch {
            allocation_rows,
            max_need_rows,
        });
    }
    if allocation_rows == 0 {
        return Err(ValidationError::NoClubs);
    }
    Ok(())
}

fn check_shapes(state: &ResourceState) -> Result<(), ValidationError> {
    let expected = state.num_resources();

    for (matrix, rows) in [
        (MatrixKind::Allocation, state.allocation()),
        (MatrixKind::MaxNeed, state.max_need()),
    ] {
        for (club, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ValidationError::ShapeMismatch {
                    matrix,
                    club,
                    row_len: row.len(),
                    expected,
                });
            }
        }
    }
    Ok(())
}

fn check_allocation_bounds(state: &ResourceState) -> Result<(), ValidationError> {
    for (club, (alloc_row, max_row)) in state
        .allocation()
        .iter()
        .zip(state.max_need())
        .enumerate()
    {
        for (resource, (alloc, max)) in alloc_row.iter().zip(max_row).enumerate() {
            if alloc > max {
                return Err(ValidationError::AllocationExceedsMax { club, resource });
            }
        }
    }
    Ok(())
}

fn check_cell_signs(state: &ResourceState) -> Result<(), ValidationError> {
    for (matrix, rows) in [
        (MatrixKind::Allocation, state.allocation()),
        (MatrixKind::MaxNeed, state.max_need()),
    ] {
        for (club, row) in rows.iter().enumerate() {
            for (resource, cell) in row.iter().enumerate() {
                if *cell < 0 {
                    return Err(ValidationError::NegativeCell {
                        matrix,
                        club,
                        resource,
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_available_signs(state: &ResourceState) -> Result<(), ValidationError> {
    for (resource, units) in state.available().iter().enumerate() {
        if *units < 0 {
            return Err(ValidationError::NegativeAvailable { resource });
        }
    }
    Ok(())
}
