//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::{DecisionRecord, ResourceRequest, ResourceState};

// ========================================================================
// PyDict Extraction Helpers (DRY Pattern)
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Arguments
/// * `dict` - Python dictionary to extract from
/// * `key` - Field name to extract
///
/// # Returns
/// Extracted value of type T
///
/// # Errors
/// Returns PyValueError if:
/// - Field is missing
/// - Type conversion fails
///
/// # Example
/// ```ignore
/// let available: Vec<i64> = extract_required(&py_dict, "available")?;
/// ```
pub(crate) fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// An explicit Python `None` counts as absent, so callers may pass
/// `{"club_names": None}` and `{"allocation": ...}` interchangeably.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
pub(crate) fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

// ========================================================================
// Payload Parsers
// ========================================================================

/// Convert a Python payload dict to a ResourceState
///
/// Expects top-level `allocation`, `max_need`, and `available` keys. The
/// snapshot is not validated here; callers run the validator so shape and
/// sign errors come back as domain messages rather than conversion noise.
///
/// # Errors
///
/// Returns PyErr if required fields are missing or are not integer
/// lists/matrices
pub fn parse_state(py_payload: &Bound<'_, PyDict>) -> PyResult<ResourceState> {
    let allocation: Vec<Vec<i64>> = extract_required(py_payload, "allocation")?;
    let max_need: Vec<Vec<i64>> = extract_required(py_payload, "max_need")?;
    let available: Vec<i64> = extract_required(py_payload, "available")?;

    Ok(ResourceState::new(allocation, max_need, available))
}

/// Convert a Python request dict (`{"club_id": ..., "resources": [...]}`)
/// to a ResourceRequest
pub fn parse_request(py_request: &Bound<'_, PyDict>) -> PyResult<ResourceRequest> {
    let club_id: usize = extract_required(py_request, "club_id")?;
    let resources: Vec<i64> = extract_required(py_request, "resources")?;

    Ok(ResourceRequest::new(club_id, resources))
}

/// Extract the optional `club_names` list from a payload dict
pub fn parse_club_names(py_payload: &Bound<'_, PyDict>) -> PyResult<Option<Vec<String>>> {
    extract_optional(py_payload, "club_names")
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a ResourceState to a Python dict
pub fn state_to_py(py: Python, state: &ResourceState) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("allocation", state.allocation().to_vec())?;
    dict.set_item("max_need", state.max_need().to_vec())?;
    dict.set_item("available", state.available().to_vec())?;

    Ok(dict.into())
}

/// Convert a DecisionRecord to a Python dict
///
/// Keys follow the service layer's journal schema (`club_name`,
/// `requested_resources`, `decision`, ...), with the record id and an
/// RFC 3339 timestamp added.
pub fn record_to_py(py: Python, record: &DecisionRecord) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("decision_id", record.decision_id.as_str())?;
    dict.set_item("timestamp", record.timestamp.to_rfc3339())?;
    dict.set_item("club_id", record.club_id)?;
    dict.set_item("club_name", record.club_label.as_str())?;
    dict.set_item("requested_resources", record.requested.clone())?;
    dict.set_item("decision", record.outcome.to_string())?;
    dict.set_item("message", record.message.as_str())?;
    dict.set_item("safe_sequence", record.safe_sequence.clone())?;

    Ok(dict.into())
}
