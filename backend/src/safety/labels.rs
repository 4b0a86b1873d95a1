//! Sequence display labels
//!
//! Cosmetic leaf of the safety pipeline: club indices in a safe sequence are
//! mapped to display names for reports and journal records. Names are an
//! external annotation, never part of the algorithmic data model.

/// Display label for one club index
///
/// Uses the name at that index when present, otherwise the positional
/// fallback `Club {index}`.
pub fn club_label(club: usize, club_names: Option<&[String]>) -> String {
    club_names
        .and_then(|names| names.get(club))
        .cloned()
        .unwrap_or_else(|| format!("Club {}", club))
}

/// Map a safe sequence's club indices to display labels
///
/// A club whose index has no entry in `club_names` gets the positional
/// fallback per index; passing `None` labels every club that way.
///
/// # Example
///
/// ```rust
/// use bankers_core_rs::club_labels;
///
/// let names = vec!["Drama Club".to_string(), "Music Club".to_string()];
///
/// assert_eq!(
///     club_labels(&[1, 0, 2], Some(&names)),
///     vec!["Music Club", "Drama Club", "Club 2"],
/// );
/// assert_eq!(club_labels(&[1, 0], None), vec!["Club 1", "Club 0"]);
/// ```
pub fn club_labels(sequence: &[usize], club_names: Option<&[String]>) -> Vec<String> {
    sequence
        .iter()
        .map(|&club| club_label(club, club_names))
        .collect()
}
