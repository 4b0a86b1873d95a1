use std::env;
use std::fs;

use serde::Deserialize;
use serde_json::json;

use bankers_core_rs::{
    club_label, club_labels, evaluate_request, find_safe_sequence, load_scenario, validate_state,
    DecisionJournal, DecisionOutcome, DecisionRecord, GrantDecision, ResourceRequest,
    ResourceState, SCENARIO_NAMES,
};

fn print_usage() {
    println!("bankers-cli <command>");
    println!("commands:");
    println!("  check <state.json>");
    println!("    validate a snapshot and print its safety verdict");
    println!("  request <payload.json>");
    println!("    evaluate the payload's nested request against its snapshot");
    println!("  run <session.json> [--csv]");
    println!("    apply the session's requests in order against the evolving state");
    println!("  scenario <name>");
    println!("    print a demo payload (basic, complex, exhausted)");
}

/// Snapshot fields shared by every payload file
#[derive(Debug, Deserialize)]
struct StatePayload {
    allocation: Vec<Vec<i64>>,
    max_need: Vec<Vec<i64>>,
    available: Vec<i64>,
    #[serde(default)]
    club_names: Option<Vec<String>>,
}

impl StatePayload {
    fn into_parts(self) -> (ResourceState, Option<Vec<String>>) {
        (
            ResourceState::new(self.allocation, self.max_need, self.available),
            self.club_names,
        )
    }
}

/// Snapshot plus one request, as `request` submits it
#[derive(Debug, Deserialize)]
struct RequestPayload {
    #[serde(flatten)]
    state: StatePayload,
    request: ResourceRequest,
}

/// Snapshot plus an ordered request list, as `run` replays it
#[derive(Debug, Deserialize)]
struct Session {
    #[serde(flatten)]
    state: StatePayload,
    requests: Vec<ResourceRequest>,
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("cannot read {}: {}", path, err))?;
    serde_json::from_str(&raw).map_err(|err| format!("invalid JSON in {}: {}", path, err))
}

fn print_json(value: &serde_json::Value) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{}", rendered);
    Ok(())
}

fn run_check(args: &[String]) -> Result<(), String> {
    let path = args.get(2).ok_or_else(|| "missing state file".to_string())?;
    let payload: StatePayload = load_json(path)?;
    let (state, club_names) = payload.into_parts();
    validate_state(&state).map_err(|err| err.to_string())?;

    let verdict = find_safe_sequence(&state);
    print_json(&json!({
        "safe": verdict.is_safe(),
        "message": if verdict.is_safe() {
            "System is in a safe state"
        } else {
            "System is in an unsafe state"
        },
        "safe_sequence": club_labels(verdict.sequence(), club_names.as_deref()),
        "need_matrix": state.need_matrix(),
    }))
}

fn run_request(args: &[String]) -> Result<(), String> {
    let path = args.get(2).ok_or_else(|| "missing payload file".to_string())?;
    let payload: RequestPayload = load_json(path)?;
    let (state, club_names) = payload.state.into_parts();
    validate_state(&state).map_err(|err| err.to_string())?;

    let decision = evaluate_request(&state, &payload.request).map_err(|err| err.to_string())?;
    let labels = club_labels(decision.sequence(), club_names.as_deref());

    // Denials report the untouched input snapshot
    let snapshot = match &decision {
        GrantDecision::Granted { new_state, .. } => new_state,
        GrantDecision::Denied { .. } => &state,
    };

    print_json(&json!({
        "granted": decision.is_granted(),
        "message": decision.message(),
        "safe_sequence": labels,
        "need_matrix": snapshot.need_matrix(),
        "new_allocation": snapshot.allocation(),
        "new_available": snapshot.available(),
    }))
}

fn run_session(args: &[String]) -> Result<(), String> {
    let path = args.get(2).ok_or_else(|| "missing session file".to_string())?;
    let want_csv = args.iter().any(|arg| arg == "--csv");

    let session: Session = load_json(path)?;
    let (mut state, club_names) = session.state.into_parts();
    validate_state(&state).map_err(|err| err.to_string())?;
    let names = club_names.as_deref();

    let journal = DecisionJournal::new();
    let mut granted = 0usize;

    for request in &session.requests {
        // Each request is judged against the state the previous decision
        // produced; a denial leaves that state as-is.
        let decision = evaluate_request(&state, request).map_err(|err| err.to_string())?;
        let labels = club_labels(decision.sequence(), names);
        let outcome = if decision.is_granted() {
            DecisionOutcome::Granted
        } else {
            DecisionOutcome::Denied
        };

        journal
            .append(DecisionRecord::new(
                request.club_id,
                club_label(request.club_id, names),
                request.resources.clone(),
                outcome,
                decision.message(),
                labels.clone(),
            ))
            .map_err(|err| err.to_string())?;

        println!(
            "decision={} club={} requested={:?} sequence={}",
            outcome,
            club_label(request.club_id, names),
            request.resources,
            if labels.is_empty() {
                "none".to_string()
            } else {
                labels.join(" -> ")
            },
        );

        if let GrantDecision::Granted { new_state, .. } = decision {
            state = new_state;
            granted += 1;
        }
    }

    let total = journal.len().map_err(|err| err.to_string())?;
    println!(
        "decisions={} granted={} denied={}",
        total,
        granted,
        total - granted
    );

    if want_csv {
        let csv = journal.export_csv().map_err(|err| err.to_string())?;
        print!("{}", csv);
    }

    Ok(())
}

fn run_scenario(args: &[String]) -> Result<(), String> {
    let name = args.get(2).ok_or_else(|| "missing scenario name".to_string())?;
    let scenario = load_scenario(name).ok_or_else(|| {
        format!(
            "invalid scenario '{}', choose from: {}",
            name,
            SCENARIO_NAMES.join(", ")
        )
    })?;

    print_json(&json!({
        "name": scenario.name,
        "description": scenario.description,
        "club_names": scenario.club_names,
        "allocation": scenario.state.allocation(),
        "max_need": scenario.state.max_need(),
        "available": scenario.state.available(),
    }))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    let result = match command {
        Some("check") => run_check(&args),
        Some("request") => run_request(&args),
        Some("run") => run_session(&args),
        Some("scenario") => run_scenario(&args),
        _ => {
            print_usage();
            return;
        }
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        print_usage();
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_payload_parses() {
        let session: Session = serde_json::from_str(
            r#"{
                "allocation": [[0, 1, 0], [2, 0, 0], [3, 0, 2]],
                "max_need": [[7, 5, 3], [3, 2, 2], [9, 0, 2]],
                "available": [3, 3, 2],
                "club_names": ["Drama Club", "Music Club", "Dance Club"],
                "requests": [{"club_id": 1, "resources": [1, 0, 2]}]
            }"#,
        )
        .unwrap();

        let (state, club_names) = session.state.into_parts();
        assert_eq!(state.num_clubs(), 3);
        assert_eq!(club_names.unwrap()[1], "Music Club");
        assert_eq!(session.requests[0].club_id, 1);
    }

    #[test]
    fn test_club_names_default_to_absent() {
        let payload: StatePayload = serde_json::from_str(
            r#"{
                "allocation": [[0, 0]],
                "max_need": [[1, 1]],
                "available": [1, 1]
            }"#,
        )
        .unwrap();

        assert!(payload.club_names.is_none());
    }
}
