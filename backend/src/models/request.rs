//! Resource request model
//!
//! A single club asking for additional units, one vector entry per resource
//! type. Requests are caller input: the evaluator checks them against the
//! club's remaining need and the available pool before any simulation runs.
//!
//! CRITICAL: All resource quantities are i64 units

use serde::{Deserialize, Serialize};

/// One club's request for additional resource units
///
/// Field names match the service-layer JSON (`club_id`, `resources`).
///
/// # Example
/// ```
/// use bankers_core_rs::ResourceRequest;
///
/// let request = ResourceRequest::new(0, vec![0, 2, 0]);
/// assert_eq!(request.club_id, 0);
/// assert_eq!(request.resources, vec![0, 2, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Requesting club, identified by row index
    pub club_id: usize,

    /// Requested units per resource type
    pub resources: Vec<i64>,
}

impl ResourceRequest {
    /// Create a request for `resources` on behalf of club `club_id`
    pub fn new(club_id: usize, resources: Vec<i64>) -> Self {
        Self { club_id, resources }
    }
}
