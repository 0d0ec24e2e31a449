//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studydesk"))
        .env("STUDYDESK_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

/// Every JSON document printed on stdout, in order.
fn json_docs(stdout: &str) -> Vec<Value> {
    let start = stdout.find(['{', '[']).unwrap_or(stdout.len());
    serde_json::Deserializer::from_str(&stdout[start..])
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("stdout is not JSON")
}

fn last_json(stdout: &str) -> Value {
    json_docs(stdout).pop().expect("no JSON on stdout")
}

fn approx(value: &Value, expected: f64) {
    let got = value.as_f64().unwrap_or_else(|| panic!("not a number: {value}"));
    assert!((got - expected).abs() < 1e-9, "expected {expected}, got {got}");
}

#[test]
fn test_band_classifies_value() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(dir.path(), &["band", "15.5"]));
    assert_eq!(out["band"], "Bien");
    assert_eq!(out["status"], "Admis");

    let out = last_json(&run_ok(dir.path(), &["band", "9.99"]));
    assert_eq!(out["band"], "À rattraper");
    assert_eq!(out["passing"], false);
}

#[test]
fn test_module_calc_full_weighting() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(
        dir.path(),
        &["module", "calc", "--exam", "15", "--td", "14", "--tp", "17"],
    ));
    approx(&out["module"]["moyenne"], 15.2);
    assert_eq!(out["band"], "Bien");
}

#[test]
fn test_module_calc_missing_required_td() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(dir.path(), &["module", "calc", "--exam", "15", "--td", ""]));
    assert!(out["module"]["moyenne"].is_null());
    assert!(out["band"].is_null());
}

#[test]
fn test_module_calc_rejects_text_score() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["module", "calc", "--exam", "abc"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_semester_show_starts_from_template() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(dir.path(), &["semester", "show"]));
    assert!(out["average"].is_null());
    assert_eq!(out["semester"]["units"].as_array().unwrap().len(), 5);
    assert_eq!(out["total_modules"], 7);
}

#[test]
fn test_semester_module_edit_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(
        dir.path(),
        &[
            "semester", "set-module", "--unit", "unit5", "--module", "mod7", "--exam", "12",
            "--td", "15",
        ],
    ));
    approx(&out["semester"]["units"][4]["moyenne"], 13.0);
    assert!(out["average"].is_null());

    let exported = last_json(&run_ok(dir.path(), &["semester", "export"]));
    approx(&exported["units"][4]["modules"][0]["grades"]["emd"], 12.0);
}

#[test]
fn test_semester_unknown_module_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["semester", "set-module", "--unit", "unit1", "--module", "nope", "--exam", "10"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("nope"));
}

#[test]
fn test_semester_calculate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("semester.json");
    std::fs::write(
        &file,
        r#"{
            "id": "s1",
            "name": "Semester 1",
            "units": [
                {"id": "u1", "name": "Unit 1", "coefficient": 3, "modules": [
                    {"id": "m1", "name": "A", "coefficient": 1, "hasTD": false, "hasTP": false,
                     "grades": {"emd": 15, "td": null, "tp": null}}
                ]},
                {"id": "u2", "name": "Unit 2", "coefficient": 2, "modules": [
                    {"id": "m2", "name": "B", "coefficient": 1, "hasTD": false, "hasTP": false,
                     "grades": {"emd": 16}}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["semester", "calculate", "--file", file.to_str().unwrap()],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("Calculation complete"));
    let out = last_json(&stdout);
    approx(&out["average"], 15.4);
    assert_eq!(out["band"], "Bien");
    assert_eq!(out["status"], "Admis");

    let shown = last_json(&run_ok(dir.path(), &["semester", "show"]));
    approx(&shown["average"], 15.4);
}

#[test]
fn test_year_default_and_manual_edit() {
    let dir = tempfile::tempdir().unwrap();
    let out = last_json(&run_ok(dir.path(), &["year", "show"]));
    approx(&out["average"], 15.0);
    assert_eq!(out["status"], "Admis");

    let out = last_json(&run_ok(dir.path(), &["year", "set", "s2", "--average", ""]));
    assert!(out["average"].is_null());
    assert!(out["status"].is_null());

    let out = last_json(&run_ok(dir.path(), &["year", "set", "s2", "--average", "5"]));
    approx(&out["average"], 9.875);
    assert_eq!(out["status"], "À rattraper");
}

#[test]
fn test_calendar_add_toggle_upcoming() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(
        dir.path(),
        &[
            "calendar", "add", "Final Exam", "--date", "2099-01-01", "--time", "09:00",
            "--priority", "high",
        ],
    );
    assert!(stdout.starts_with("Task created:"));
    let task = last_json(&stdout);
    assert_eq!(task["priority"], "high");
    assert_eq!(task["duration"], 60);
    let id = task["id"].as_str().unwrap().to_string();

    let upcoming = last_json(&run_ok(dir.path(), &["calendar", "upcoming"]));
    assert_eq!(upcoming[0]["task"]["id"], id.as_str());

    run_ok(dir.path(), &["calendar", "toggle", &id]);
    let upcoming = last_json(&run_ok(dir.path(), &["calendar", "upcoming"]));
    assert!(upcoming.as_array().unwrap().is_empty());

    let month = last_json(&run_ok(dir.path(), &["calendar", "month", "--year", "2099", "--month", "1"]));
    assert_eq!(month["days"][0]["taskCount"], 1);
}

#[test]
fn test_calendar_rejects_empty_title() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["calendar", "add", "  "]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "timer.work_min"]).trim(), "25");
    run_ok(dir.path(), &["config", "set", "timer.work_min", "50"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "timer.work_min"]).trim(), "50");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("timer.nope"));
}

#[test]
fn test_timer_start_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let docs = json_docs(&run_ok(dir.path(), &["timer", "start"]));
    assert_eq!(docs[0]["type"], "TimerStarted");
    assert_eq!(docs.last().unwrap()["state"], "running");

    let status = last_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["state"], "running");
    assert_eq!(status["mode"], "work");

    let status = last_json(&run_ok(dir.path(), &["timer", "reset"]));
    assert_eq!(status["state"], "idle");
    assert_eq!(status["remaining"], "25:00");
}
