//! Property Tests for the Safety Core
//!
//! Generates valid snapshots (allocation never exceeding max need, nothing
//! negative) and checks the invariants that must hold on every one of them:
//! need derivation, verdict determinism, sequence replayability, and
//! conservation of units across grants.

use proptest::prelude::*;

use bankers_core_rs::{
    evaluate_request, find_safe_sequence, validate_state, DenialReason, GrantDecision,
    ResourceRequest, ResourceState, SafetyVerdict,
};

// ============================================================================
// Generators
// ============================================================================

/// A snapshot that passes validation by construction: each cell is generated
/// as (held, slack) with max = held + slack
fn valid_state() -> impl Strategy<Value = ResourceState> {
    (1usize..=5, 1usize..=4).prop_flat_map(|(clubs, resources)| {
        (
            proptest::collection::vec(
                proptest::collection::vec((0i64..=6, 0i64..=6), resources),
                clubs,
            ),
            proptest::collection::vec(0i64..=8, resources),
        )
            .prop_map(|(cells, available)| {
                let allocation = cells
                    .iter()
                    .map(|row| row.iter().map(|&(held, _)| held).collect())
                    .collect();
                let max_need = cells
                    .iter()
                    .map(|row| row.iter().map(|&(held, slack)| held + slack).collect())
                    .collect();
                ResourceState::new(allocation, max_need, available)
            })
    })
}

/// A valid snapshot plus a well-formed request aimed at one of its clubs
fn state_and_request() -> impl Strategy<Value = (ResourceState, ResourceRequest)> {
    valid_state().prop_flat_map(|state| {
        let clubs = state.num_clubs();
        let resources = state.num_resources();
        (
            Just(state),
            0..clubs,
            proptest::collection::vec(0i64..=6, resources),
        )
            .prop_map(|(state, club_id, units)| {
                let request = ResourceRequest::new(club_id, units);
                (state, request)
            })
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_generated_states_validate(state in valid_state()) {
        prop_assert_eq!(validate_state(&state), Ok(()));
    }

    #[test]
    fn prop_need_is_max_minus_allocation_and_never_negative(state in valid_state()) {
        let need = state.need_matrix();

        for club in 0..state.num_clubs() {
            for resource in 0..state.num_resources() {
                let expected =
                    state.max_need()[club][resource] - state.allocation()[club][resource];
                prop_assert_eq!(need[club][resource], expected);
                prop_assert!(need[club][resource] >= 0);
            }
        }
    }

    #[test]
    fn prop_verdict_is_deterministic(state in valid_state()) {
        prop_assert_eq!(find_safe_sequence(&state), find_safe_sequence(&state));
    }

    #[test]
    fn prop_safe_sequence_visits_every_club_once_and_replays(state in valid_state()) {
        if let SafetyVerdict::Safe { sequence } = find_safe_sequence(&state) {
            // A completion order is a permutation of the club set
            let mut seen = vec![false; state.num_clubs()];
            for &club in &sequence {
                prop_assert!(club < state.num_clubs());
                prop_assert!(!seen[club], "club {} completed twice", club);
                seen[club] = true;
            }
            prop_assert!(seen.iter().all(|&done| done));

            // Replaying it, every club's need fits the running pool at its
            // turn, and its release grows the pool
            let need = state.need_matrix();
            let mut work = state.available().to_vec();
            for &club in &sequence {
                for resource in 0..state.num_resources() {
                    prop_assert!(
                        need[club][resource] <= work[resource],
                        "club {} placed before its need fit the pool",
                        club
                    );
                }
                for resource in 0..state.num_resources() {
                    work[resource] += state.allocation()[club][resource];
                }
            }
        }
    }

    #[test]
    fn prop_decisions_are_deterministic((state, request) in state_and_request()) {
        let first = evaluate_request(&state, &request);
        let second = evaluate_request(&state, &request);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_grants_conserve_units((state, request) in state_and_request()) {
        let decision = evaluate_request(&state, &request)
            .expect("generated requests are well-formed");

        match decision {
            GrantDecision::Granted { new_state, .. } => {
                // Exactly the requested units moved from the pool to the
                // requesting club's row; everything else is untouched
                for resource in 0..state.num_resources() {
                    prop_assert_eq!(
                        new_state.available()[resource],
                        state.available()[resource] - request.resources[resource]
                    );
                }
                for club in 0..state.num_clubs() {
                    for resource in 0..state.num_resources() {
                        let moved = if club == request.club_id {
                            request.resources[resource]
                        } else {
                            0
                        };
                        prop_assert_eq!(
                            new_state.allocation()[club][resource],
                            state.allocation()[club][resource] + moved
                        );
                    }
                }
                prop_assert_eq!(new_state.max_need(), state.max_need());

                // The committed snapshot still validates and is still safe
                prop_assert_eq!(validate_state(&new_state), Ok(()));
                prop_assert!(find_safe_sequence(&new_state).is_safe());
            }
            GrantDecision::Denied { reason } => {
                // Each denial reason names a guard that really failed
                match reason {
                    DenialReason::ExceedsDeclaredNeed { club, resource } => {
                        let need = state.need_matrix();
                        prop_assert_eq!(club, request.club_id);
                        prop_assert!(request.resources[resource] > need[club][resource]);
                    }
                    DenialReason::ExceedsAvailable { resource } => {
                        prop_assert!(
                            request.resources[resource] > state.available()[resource]
                        );
                    }
                    DenialReason::WouldBeUnsafe => {
                        let simulated =
                            state.with_request_applied(request.club_id, &request.resources);
                        prop_assert_eq!(find_safe_sequence(&simulated), SafetyVerdict::Unsafe);
                    }
                }
            }
        }
    }
}
