//! Replay determinism and on-disk contracts over the real file formats.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use truth_engine::pipeline::run_files;
use truth_engine::replay::{replay_files, ReplayError};
use truth_engine::store;

fn write_events(path: &Path, lines: &[&str]) {
    fs::write(path, lines.join("\n") + "\n").expect("write events");
}

fn sample_events() -> Vec<&'static str> {
    vec![
        r#"{"event_id":"e1","item_id":"P1","timestamp":0,"source":"HISTORIC","price_cents":10000,"outcome":"NONE"}"#,
        r#"{"event_id":"e2","item_id":"P1","timestamp":1000,"source":"SUPPLIER","price_cents":10200,"outcome":"NONE"}"#,
        r#"{"event_id":"e3","item_id":"P1","timestamp":2000,"source":"HISTORIC","price_cents":10100,"outcome":"NONE"}"#,
        r#"{"event_id":"e4","item_id":"P1","timestamp":3000,"source":"HUMAN","price_cents":10500,"outcome":"QUOTE_ACCEPTED"}"#,
        r#"{"event_id":"e5","item_id":"P2","timestamp":3500,"source":"HUMAN","price_cents":400,"outcome":"QUOTE_REJECTED"}"#,
    ]
}

#[test]
fn two_runs_on_identical_input_are_byte_identical() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    write_events(&events, &sample_events());

    let state_a = dir.path().join("a_state.json");
    let audit_a = dir.path().join("a_audit.jsonl");
    let state_b = dir.path().join("b_state.json");
    let audit_b = dir.path().join("b_audit.jsonl");

    let hash_a = run_files(&events, &state_a, &audit_a).expect("run a");
    let hash_b = run_files(&events, &state_b, &audit_b).expect("run b");

    assert_eq!(hash_a, hash_b);
    assert_eq!(fs::read(&state_a).unwrap(), fs::read(&state_b).unwrap());
    assert_eq!(fs::read(&audit_a).unwrap(), fs::read(&audit_b).unwrap());
}

#[test]
fn audit_tail_hash_equals_saved_state_hash() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    write_events(&events, &sample_events());

    let state_path = dir.path().join("rules_state.json");
    let audit_path = dir.path().join("audit_log.jsonl");
    let final_hash = run_files(&events, &state_path, &audit_path).expect("run");

    let audit = fs::read_to_string(&audit_path).unwrap();
    let last: Value = serde_json::from_str(audit.lines().last().expect("audit lines")).unwrap();
    assert_eq!(last["state_hash_after"].as_str().unwrap(), final_hash);

    let state = store::load(&state_path).expect("load saved state");
    assert_eq!(state.state_hash, final_hash);
}

#[test]
fn input_file_order_is_irrelevant() {
    let dir = TempDir::new().expect("tempdir");
    let sorted = dir.path().join("sorted.jsonl");
    let shuffled = dir.path().join("shuffled.jsonl");

    let mut lines = sample_events();
    write_events(&sorted, &lines);
    lines.reverse();
    write_events(&shuffled, &lines);

    let hash_a = run_files(&sorted, &dir.path().join("sa.json"), &dir.path().join("aa.jsonl"))
        .expect("run sorted");
    let hash_b = run_files(
        &shuffled,
        &dir.path().join("sb.json"),
        &dir.path().join("ab.jsonl"),
    )
    .expect("run shuffled");

    assert_eq!(hash_a, hash_b);
    assert_eq!(
        fs::read(dir.path().join("aa.jsonl")).unwrap(),
        fs::read(dir.path().join("ab.jsonl")).unwrap()
    );
}

#[test]
fn duplicate_event_ids_are_a_no_op() {
    let dir = TempDir::new().expect("tempdir");
    let once = dir.path().join("once.jsonl");
    let twice = dir.path().join("twice.jsonl");

    let lines = sample_events();
    write_events(&once, &lines);
    let mut doubled = lines.clone();
    doubled.extend(lines.iter().copied());
    write_events(&twice, &doubled);

    let hash_a = run_files(&once, &dir.path().join("so.json"), &dir.path().join("ao.jsonl"))
        .expect("run once");
    let hash_b = run_files(&twice, &dir.path().join("st.json"), &dir.path().join("at.jsonl"))
        .expect("run twice");

    assert_eq!(hash_a, hash_b);
    assert_eq!(
        fs::read(dir.path().join("ao.jsonl")).unwrap(),
        fs::read(dir.path().join("at.jsonl")).unwrap(),
        "duplicates must not emit audit lines"
    );
}

#[test]
fn rerun_against_saved_state_skips_everything() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    write_events(&events, &sample_events());

    let state_path = dir.path().join("rules_state.json");
    let first = run_files(&events, &state_path, &dir.path().join("a1.jsonl")).expect("first run");
    let second = run_files(&events, &state_path, &dir.path().join("a2.jsonl")).expect("second run");

    assert_eq!(first, second, "seen ids make reruns idempotent");
    assert_eq!(
        fs::read_to_string(dir.path().join("a2.jsonl")).unwrap(),
        "",
        "every event is a known duplicate on the second run"
    );
}

#[test]
fn replay_verifies_a_recorded_hash() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    write_events(&events, &sample_events());

    let run_audit = dir.path().join("audit_log.jsonl");
    let hash = run_files(&events, &dir.path().join("rules_state.json"), &run_audit).expect("run");

    let verify = dir.path().join("expected_hash.txt");
    fs::write(&verify, format!("{hash}\n")).unwrap();

    let replay_audit = dir.path().join("replay_audit.jsonl");
    let replayed = replay_files(
        &events,
        &dir.path().join("replay_state.json"),
        &replay_audit,
        &verify,
    )
    .expect("replay");

    assert_eq!(replayed, hash);
    assert_eq!(
        fs::read(&run_audit).unwrap(),
        fs::read(&replay_audit).unwrap(),
        "replay reproduces the audit log byte-for-byte"
    );
}

#[test]
fn replay_mismatch_reports_both_hashes() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    write_events(&events, &sample_events());

    let verify = dir.path().join("expected_hash.txt");
    fs::write(&verify, "0".repeat(64)).unwrap();

    let err = replay_files(
        &events,
        &dir.path().join("replay_state.json"),
        &dir.path().join("replay_audit.jsonl"),
        &verify,
    )
    .expect_err("hashes cannot match");

    match &err {
        ReplayError::Mismatch { expected, actual } => {
            assert_eq!(expected, &"0".repeat(64));
            assert_ne!(expected, actual);
        }
        other => panic!("expected Mismatch, got {other:?}"),
    }
    assert!(err.to_string().starts_with("REPLAY_MISMATCH"));
}

#[test]
fn invalid_event_aborts_with_line_number_before_any_output() {
    let dir = TempDir::new().expect("tempdir");
    let events = dir.path().join("events.jsonl");
    let mut lines = sample_events();
    lines.insert(
        2,
        r#"{"event_id":"bad","item_id":"P1","timestamp":1500,"source":"SUPPLIER","price_cents":-5,"outcome":"NONE"}"#,
    );
    write_events(&events, &lines);

    let state_path = dir.path().join("rules_state.json");
    let err = run_files(&events, &state_path, &dir.path().join("audit.jsonl"))
        .expect_err("negative price must abort");
    let msg = err.to_string();
    assert!(msg.starts_with("INVALID_EVENT at line 3"), "got: {msg}");
    assert!(!state_path.exists(), "no state may be written for an aborted run");
}
