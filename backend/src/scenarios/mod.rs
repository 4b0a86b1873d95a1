//! Demo scenarios
//!
//! Named, self-describing states for demos and smoke tests. Each scenario
//! bundles a snapshot with club display names and an honest description:
//! a scenario labelled safe really does admit a completion order under the
//! lowest-index-first scan, and the exhausted one really does not.

use crate::models::ResourceState;
use serde::{Deserialize, Serialize};

/// Keys accepted by [`load_scenario`]
pub const SCENARIO_NAMES: [&str; 3] = ["basic", "complex", "exhausted"];

/// A named demo state with club display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Lookup key
    pub name: String,

    /// One-line description of what the state demonstrates
    pub description: String,

    /// Display names, one per club row
    pub club_names: Vec<String>,

    /// The snapshot itself
    pub state: ResourceState,
}

/// Look up a demo scenario by key
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::{find_safe_sequence, load_scenario};
///
/// let demo = load_scenario("basic").unwrap();
/// assert_eq!(demo.club_names.len(), demo.state.num_clubs());
/// assert!(find_safe_sequence(&demo.state).is_safe());
///
/// assert!(load_scenario("no-such-demo").is_none());
/// ```
pub fn load_scenario(name: &str) -> Option<Scenario> {
    match name {
        "basic" => Some(basic()),
        "complex" => Some(complex()),
        "exhausted" => Some(exhausted()),
        _ => None,
    }
}

/// Classic five-club state over three resource types; safe, with greedy
/// completion order `[1, 3, 0, 2, 4]`
fn basic() -> Scenario {
    Scenario {
        name: "basic".to_string(),
        description: "Five clubs sharing three resource types; a safe ordering exists".to_string(),
        club_names: vec![
            "Drama Club".to_string(),
            "Music Club".to_string(),
            "Dance Club".to_string(),
            "Robotics Club".to_string(),
            "Film Club".to_string(),
        ],
        state: ResourceState::new(
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
        ),
    }
}

/// Five clubs over four resource types; safe, with greedy completion order
/// `[0, 2, 1, 3, 4]`
fn complex() -> Scenario {
    Scenario {
        name: "complex".to_string(),
        description: "Five clubs competing for four resource types".to_string(),
        club_names: vec![
            "Tech Club".to_string(),
            "Art Club".to_string(),
            "Sports Club".to_string(),
            "Literature Club".to_string(),
            "Photography Club".to_string(),
        ],
        state: ResourceState::new(
            vec![
                vec![0, 0, 1, 2],
                vec![1, 0, 0, 0],
                vec![1, 3, 5, 4],
                vec![0, 6, 3, 2],
                vec![0, 0, 1, 4],
            ],
            vec![
                vec![0, 0, 1, 2],
                vec![1, 7, 5, 0],
                vec![2, 3, 5, 6],
                vec![0, 6, 5, 2],
                vec![0, 6, 5, 6],
            ],
            vec![1, 5, 2, 0],
        ),
    }
}

/// Empty pool with outstanding need everywhere; unsafe
fn exhausted() -> Scenario {
    Scenario {
        name: "exhausted".to_string(),
        description: "Exhausted pool with outstanding need; no safe ordering exists".to_string(),
        club_names: vec![
            "Drama Club".to_string(),
            "Music Club".to_string(),
            "Dance Club".to_string(),
        ],
        state: ResourceState::new(
            vec![vec![0, 1, 0], vec![3, 0, 2], vec![3, 0, 2]],
            vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2]],
            vec![0, 0, 0],
        ),
    }
}
