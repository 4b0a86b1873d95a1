//! Python FFI bindings for the allocation engine
//!
//! Exposes the grant pipeline to Python with PyO3. The engine owns the
//! decision journal; the decision core stays stateless and is called once
//! per request. Payloads are plain dicts mirroring the service layer's JSON
//! schema (`allocation`, `max_need`, `available`, optional `club_names`,
//! and a nested `request` dict for grant calls).
//!
//! Error mapping: malformed payloads and validation failures become
//! `ValueError`; journal lock poisoning becomes `RuntimeError`. Denials are
//! not errors and come back as ordinary response dicts.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{DecisionJournal, DecisionOutcome, DecisionRecord, JournalError};
use crate::safety::{club_label, club_labels, evaluate_request, find_safe_sequence, GrantDecision};
use crate::scenarios::SCENARIO_NAMES;
use crate::validation::validate_state;

use super::types::{parse_club_names, parse_request, parse_state, record_to_py, state_to_py};

fn journal_err(err: JournalError) -> PyErr {
    match err {
        JournalError::NothingToExport => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
        JournalError::LockPoisoned => {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(err.to_string())
        }
    }
}

fn value_err(message: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message)
}

/// Python-accessible allocation engine
///
/// Wraps the stateless decision core and a thread-safe decision journal.
/// One engine per service process; every grant decision taken through
/// [`PyAllocationEngine::run_request`] is journalled, while
/// [`PyAllocationEngine::check_safety`] is a read-only probe.
#[pyclass(name = "AllocationEngine")]
pub struct PyAllocationEngine {
    journal: DecisionJournal,
}

#[pymethods]
impl PyAllocationEngine {
    /// Create a new engine with an empty decision journal
    #[new]
    pub fn new() -> Self {
        Self {
            journal: DecisionJournal::new(),
        }
    }

    /// Evaluate one resource request and journal the decision
    ///
    /// # Arguments
    /// * `payload` - Dict with `allocation`, `max_need`, `available`,
    ///   optional `club_names`, and a nested `request` dict
    ///   (`{"club_id": ..., "resources": [...]}`)
    ///
    /// # Returns
    /// Dict with keys:
    /// - `granted`: bool
    /// - `message`: decision message
    /// - `safe_sequence`: labelled completion order (empty on denial)
    /// - `need_matrix`, `new_allocation`, `new_available`: the post-grant
    ///   snapshot, or the unchanged input snapshot on denial
    /// - `record`: the journalled decision record
    ///
    /// # Errors
    /// `ValueError` for missing fields, validation failures, or malformed
    /// requests; `RuntimeError` if the journal lock is poisoned
    pub fn run_request(&self, py: Python<'_>, payload: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
        let state = parse_state(payload)?;
        validate_state(&state).map_err(|e| value_err(e.to_string()))?;

        let request_dict = payload
            .get_item("request")?
            .ok_or_else(|| value_err("Missing required field 'request'".to_string()))?
            .downcast_into::<PyDict>()
            .map_err(|_| value_err("Field 'request' must be a dict".to_string()))?;
        let request = parse_request(&request_dict)?;
        let club_names = parse_club_names(payload)?;
        let names = club_names.as_deref();

        let decision =
            evaluate_request(&state, &request).map_err(|e| value_err(e.to_string()))?;

        let labels = club_labels(decision.sequence(), names);
        let outcome = if decision.is_granted() {
            DecisionOutcome::Granted
        } else {
            DecisionOutcome::Denied
        };

        let record = DecisionRecord::new(
            request.club_id,
            club_label(request.club_id, names),
            request.resources.clone(),
            outcome,
            decision.message(),
            labels.clone(),
        );
        self.journal.append(record.clone()).map_err(journal_err)?;

        // Denials report the untouched input snapshot
        let snapshot = match &decision {
            GrantDecision::Granted { new_state, .. } => new_state,
            GrantDecision::Denied { .. } => &state,
        };

        let dict = PyDict::new(py);
        dict.set_item("granted", decision.is_granted())?;
        dict.set_item("message", decision.message())?;
        dict.set_item("safe_sequence", labels)?;
        dict.set_item("need_matrix", snapshot.need_matrix())?;
        dict.set_item("new_allocation", snapshot.allocation().to_vec())?;
        dict.set_item("new_available", snapshot.available().to_vec())?;
        dict.set_item("record", record_to_py(py, &record)?)?;

        Ok(dict.into())
    }

    /// Check whether a snapshot is safe, without journalling anything
    ///
    /// # Arguments
    /// * `payload` - Dict with `allocation`, `max_need`, `available`, and
    ///   optional `club_names`
    ///
    /// # Returns
    /// Dict with `safe`, `message`, labelled `safe_sequence`, and
    /// `need_matrix`
    pub fn check_safety(
        &self,
        py: Python<'_>,
        payload: &Bound<'_, PyDict>,
    ) -> PyResult<Py<PyDict>> {
        let state = parse_state(payload)?;
        validate_state(&state).map_err(|e| value_err(e.to_string()))?;
        let club_names = parse_club_names(payload)?;

        let verdict = find_safe_sequence(&state);

        let dict = PyDict::new(py);
        dict.set_item("safe", verdict.is_safe())?;
        dict.set_item(
            "message",
            if verdict.is_safe() {
                "System is in a safe state"
            } else {
                "System is in an unsafe state"
            },
        )?;
        dict.set_item(
            "safe_sequence",
            club_labels(verdict.sequence(), club_names.as_deref()),
        )?;
        dict.set_item("need_matrix", state.need_matrix())?;

        Ok(dict.into())
    }

    /// All journalled decisions in append order, as dicts
    pub fn decision_log(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        let records = self.journal.records().map_err(journal_err)?;

        let py_list = PyList::empty(py);
        for record in &records {
            py_list.append(record_to_py(py, record)?)?;
        }

        Ok(py_list.into())
    }

    /// Render the journal as CSV
    ///
    /// # Errors
    /// `ValueError` if no decisions have been journalled yet
    pub fn export_csv(&self) -> PyResult<String> {
        self.journal.export_csv().map_err(journal_err)
    }

    /// Drop all journalled decisions
    pub fn reset(&self) -> PyResult<()> {
        self.journal.clear().map_err(journal_err)
    }

    /// Number of journalled decisions
    pub fn decision_count(&self) -> PyResult<usize> {
        self.journal.len().map_err(journal_err)
    }

    /// Load a named demo scenario as a ready-to-submit payload dict
    ///
    /// # Arguments
    /// * `name` - One of `basic`, `complex`, `exhausted`
    ///
    /// # Errors
    /// `ValueError` for an unknown scenario name
    #[staticmethod]
    pub fn load_scenario(py: Python<'_>, name: &str) -> PyResult<Py<PyDict>> {
        let scenario = crate::scenarios::load_scenario(name).ok_or_else(|| {
            value_err(format!(
                "Invalid scenario '{}'. Choose from: {}",
                name,
                SCENARIO_NAMES.join(", ")
            ))
        })?;

        let dict = state_to_py(py, &scenario.state)?;
        let bound = dict.bind(py);
        bound.set_item("name", scenario.name.as_str())?;
        bound.set_item("description", scenario.description.as_str())?;
        bound.set_item("club_names", scenario.club_names.clone())?;

        Ok(dict)
    }
}
