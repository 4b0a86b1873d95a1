//! Request Evaluator Tests
//!
//! Tests the grant pipeline end to end: guard order, denial reasons,
//! atomic commitment of granted requests, and malformed-request errors.

use bankers_core_rs::{
    evaluate_request, find_safe_sequence, DenialReason, GrantDecision, RequestError,
    ResourceRequest, ResourceState,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// The classic five-club snapshot, greedily safe as 1, 3, 0, 2, 4
fn create_classic_state() -> ResourceState {
    ResourceState::new(
        vec![
            vec![0, 1, 0],
            vec![2, 0, 0],
            vec![3, 0, 2],
            vec![2, 1, 1],
            vec![0, 0, 2],
        ],
        vec![
            vec![7, 5, 3],
            vec![3, 2, 2],
            vec![9, 0, 2],
            vec![2, 2, 2],
            vec![4, 3, 3],
        ],
        vec![3, 3, 2],
    )
}

/// Three-club snapshot that is already unsafe (only club 1 can finish)
fn create_starved_state() -> ResourceState {
    ResourceState::new(
        vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]],
        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2]],
        vec![3, 3, 2],
    )
}

fn create_request(club_id: usize, resources: Vec<i64>) -> ResourceRequest {
    ResourceRequest::new(club_id, resources)
}

// ============================================================================
// Grants
// ============================================================================

#[test]
fn test_grant_commits_the_simulated_snapshot() {
    let state = create_classic_state();
    let decision = evaluate_request(&state, &create_request(1, vec![1, 0, 2]))
        .expect("well-formed request");

    assert!(decision.is_granted());
    assert_eq!(decision.sequence(), &[1, 3, 0, 2, 4]);
    assert_eq!(
        decision.message(),
        "Request granted. System remains in a safe state."
    );

    match decision {
        GrantDecision::Granted { new_state, .. } => {
            // Units moved pool -> club, maxima untouched
            assert_eq!(new_state.available(), &[2, 3, 0]);
            assert_eq!(new_state.allocation()[1], vec![3, 0, 2]);
            assert_eq!(new_state.max_need(), state.max_need());
        }
        GrantDecision::Denied { .. } => unreachable!("decision was granted"),
    }
}

#[test]
fn test_granting_full_remaining_need_zeroes_the_need_row() {
    // Club 3 needs exactly [0, 1, 1]; granting all of it leaves nothing
    let state = create_classic_state();
    let decision = evaluate_request(&state, &create_request(3, vec![0, 1, 1]))
        .expect("well-formed request");

    match decision {
        GrantDecision::Granted { new_state, sequence } => {
            assert_eq!(new_state.need_row(3), Some(vec![0, 0, 0]));
            assert_eq!(sequence, vec![3, 1, 0, 2, 4]);
        }
        GrantDecision::Denied { .. } => unreachable!("request fits need and pool"),
    }
}

#[test]
fn test_zero_request_on_safe_state_is_granted_unchanged() {
    let state = create_classic_state();
    let decision = evaluate_request(&state, &create_request(2, vec![0, 0, 0]))
        .expect("well-formed request");

    match decision {
        GrantDecision::Granted { new_state, .. } => {
            assert_eq!(new_state, state, "Nothing was asked, nothing moved");
        }
        GrantDecision::Denied { .. } => unreachable!("safe state stays safe"),
    }
}

// ============================================================================
// Denials
// ============================================================================

#[test]
fn test_denied_when_request_exceeds_declared_need() {
    // Club 1 has need [1, 2, 2]; asking 3 of resource 0 exceeds it even
    // though the pool holds exactly 3
    let decision = evaluate_request(&create_starved_state(), &create_request(1, vec![3, 0, 0]))
        .expect("well-formed request");

    assert_eq!(
        decision,
        GrantDecision::Denied {
            reason: DenialReason::ExceedsDeclaredNeed {
                club: 1,
                resource: 0,
            },
        }
    );
}

#[test]
fn test_denied_when_request_exceeds_available_pool() {
    // Club 0 may still need 7 of resource 0, but the pool holds only 3
    let decision = evaluate_request(&create_starved_state(), &create_request(0, vec![4, 0, 0]))
        .expect("well-formed request");

    assert_eq!(
        decision,
        GrantDecision::Denied {
            reason: DenialReason::ExceedsAvailable { resource: 0 },
        }
    );
}

#[test]
fn test_denied_when_simulated_state_is_unsafe() {
    // Both guards pass, but moving 2 units of resource 1 to club 0 leaves
    // work at [3, 1, 2]: then not even club 1 (need [1, 2, 2]) can finish
    let decision = evaluate_request(&create_starved_state(), &create_request(0, vec![0, 2, 0]))
        .expect("well-formed request");

    assert_eq!(
        decision,
        GrantDecision::Denied {
            reason: DenialReason::WouldBeUnsafe,
        }
    );
}

#[test]
fn test_zero_request_on_unsafe_state_is_denied() {
    // A zero request changes nothing, and the starved snapshot is already
    // unsafe; the checker's verdict decides
    let state = create_starved_state();
    assert!(!find_safe_sequence(&state).is_safe());

    let decision = evaluate_request(&state, &create_request(1, vec![0, 0, 0]))
        .expect("well-formed request");

    assert_eq!(
        decision,
        GrantDecision::Denied {
            reason: DenialReason::WouldBeUnsafe,
        }
    );
}

#[test]
fn test_denial_leaves_the_snapshot_reusable() {
    let state = create_classic_state();
    let before = state.clone();

    // Over-need request is denied
    let denied = evaluate_request(&state, &create_request(3, vec![1, 2, 2]))
        .expect("well-formed request");
    assert!(!denied.is_granted());
    assert_eq!(state, before, "Denial must not disturb the snapshot");

    // The same snapshot still grants a request that fits
    let granted = evaluate_request(&state, &create_request(1, vec![1, 0, 2]))
        .expect("well-formed request");
    assert!(granted.is_granted());
}

#[test]
fn test_need_guard_fires_before_pool_guard() {
    // Club 3 asks 3 of resource 0: the pool could pay it, but the club
    // only declared a remaining need of 0, so the need guard answers
    let decision = evaluate_request(&create_classic_state(), &create_request(3, vec![3, 0, 0]))
        .expect("well-formed request");

    assert_eq!(
        decision,
        GrantDecision::Denied {
            reason: DenialReason::ExceedsDeclaredNeed {
                club: 3,
                resource: 0,
            },
        }
    );
}

// ============================================================================
// Malformed Requests
// ============================================================================

#[test]
fn test_unknown_club_is_an_error() {
    let result = evaluate_request(&create_classic_state(), &create_request(9, vec![0, 0, 0]));

    assert_eq!(
        result,
        Err(RequestError::UnknownClub {
            club: 9,
            num_clubs: 5,
        })
    );
}

#[test]
fn test_wrong_vector_length_is_an_error() {
    let result = evaluate_request(&create_classic_state(), &create_request(1, vec![1, 0]));

    assert_eq!(
        result,
        Err(RequestError::ResourceCountMismatch {
            got: 2,
            expected: 3,
        })
    );
}

#[test]
fn test_negative_units_are_an_error() {
    let result = evaluate_request(&create_classic_state(), &create_request(1, vec![0, -1, 0]));

    assert_eq!(result, Err(RequestError::NegativeUnits { resource: 1 }));
}

// ============================================================================
// Wire Shape
// ============================================================================

#[test]
fn test_decision_serializes_tagged() {
    let denied = serde_json::to_string(&GrantDecision::Denied {
        reason: DenialReason::WouldBeUnsafe,
    })
    .unwrap();

    assert!(denied.contains(r#""decision":"denied""#));
    assert!(denied.contains(r#""reason":"would_be_unsafe""#));
}
