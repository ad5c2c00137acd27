use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_fleetsim")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("fleetsim-{name}-{stamp}.{ext}"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("FLEETSIM_SPECS")
        .env_remove("FLEETSIM_WORKERS")
        .output()
        .expect("fleetsim should run")
}

#[test]
fn missing_command_prints_usage() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: fleetsim"));
}

#[test]
fn simulate_command_emits_json_report() {
    let output = run(&[
        "simulate",
        "light_fighter=1",
        "small_transporter=1",
        "42",
        "--json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    assert_eq!(payload["winner"], "attacker");
    assert_eq!(payload["start"]["attacker"]["light_fighter"], 1);
    assert!(payload["rounds"].is_array());
}

#[test]
fn simulate_command_renders_text_by_default() {
    let output = run(&["simulate", "heavy_fighter=5", "light_fighter=5", "1"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("A battle took place:"));
    assert!(stdout.contains("Winner: "));
}

#[test]
fn simulate_command_exports_csv() {
    let output = run(&[
        "simulate",
        "battle_ship=3",
        "large_transporter=2",
        "9",
        "--csv",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("round,side,ship_type,count"));
    assert!(stdout.contains("0,attacker,battle_ship,3"));
    assert!(stdout.contains("0,defender,large_transporter,2"));
}

#[test]
fn simulate_command_rejects_unknown_ship_type() {
    let output = run(&["simulate", "destroyer=1", "light_fighter=1"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid attacker fleet"));
}

#[test]
fn simulate_command_returns_usage_without_fleets() {
    let output = run(&["simulate", "light_fighter=1"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: fleetsim simulate"));
}

#[test]
fn simulate_command_fails_cleanly_on_oversized_fleet() {
    let output = run(&[
        "simulate",
        "light_fighter=18446744073709551615",
        "heavy_fighter=1",
        "1",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation failed"));
    assert!(stderr.contains("too large"));
}

#[test]
fn odds_command_emits_summary_json() {
    let output = run(&["odds", "light_fighter=1", "small_transporter=1", "50", "3"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("odds should emit json");
    assert_eq!(payload["trials"], 50);
    assert_eq!(payload["attacker_win_rate"], 1.0);
}

#[test]
fn specs_command_lists_builtin_table() {
    let output = run(&["specs"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("specs should emit json");
    assert_eq!(payload["mothership"]["shields"], 250000.0);
    assert_eq!(payload.as_object().map(|map| map.len()), Some(6));
}

#[test]
fn specs_command_honours_configured_table() {
    let path = unique_temp_path("configured", "yaml");
    fs::write(&path, "light_fighter: { hull: 1, shields: 2, weapons: 3 }\n")
        .expect("should write temp table");

    let output = Command::new(bin())
        .arg("specs")
        .env("FLEETSIM_SPECS", &path)
        .output()
        .expect("specs should run");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("specs should emit json");
    assert_eq!(payload["light_fighter"]["weapons"], 3.0);
    assert!(payload.get("mothership").is_none());
}

#[test]
fn validate_command_accepts_bundled_table() {
    let output = run(&["validate", "data/ships.yaml"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_command_ignores_flags_when_picking_the_path() {
    let output = run(&["validate", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed: data/ships.yaml"));
}

#[test]
fn validate_command_rejects_negative_stats() {
    let path = unique_temp_path("invalid", "json");
    fs::write(
        &path,
        r#"{ "heavy_fighter": { "hull": -5, "shields": 250, "weapons": 1500 } }"#,
    )
    .expect("should write temp table");

    let output = run(&["validate", path.to_str().expect("temp path should be utf-8")]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
    assert!(stderr.contains("hull must be non-negative"));
}

#[test]
fn validate_command_reports_unreadable_file() {
    let path = unique_temp_path("missing", "yaml");

    let output = run(&["validate", path.to_str().expect("temp path should be utf-8")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not load"));
}
