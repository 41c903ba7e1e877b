use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn facts_text_summarizes_snapshot() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mds-fabric"));
    cmd.arg("facts")
        .arg("--snapshot")
        .arg(fixture("fixtures/snapshots/basic"))
        .arg("--vsan")
        .arg("10")
        .arg("--vsan")
        .arg("20")
        .assert()
        .success()
        .stdout(predicate::str::contains("  distribute: disabled"))
        .stdout(predicate::str::contains("  entries: 3"))
        .stdout(predicate::str::contains("zone vsan 20"))
        .stdout(predicate::str::contains("  default-zone: permit"));
}

#[test]
fn facts_json_reports_locks() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("mds-fabric"))
        .arg("facts")
        .arg("--snapshot")
        .arg(fixture("fixtures/snapshots/locked"))
        .arg("--vsan")
        .arg("10")
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let facts: Value = serde_json::from_slice(&output.stdout).expect("json parse");
    assert_eq!(facts["device_alias"]["locked"], Value::Bool(true));
    assert_eq!(facts["device_alias"]["mode"], Value::from("enhanced"));
    assert_eq!(facts["zones"][0]["locked"], Value::Bool(true));
    assert_eq!(facts["zones"][0]["session"], Value::from("cli"));
}

#[test]
fn missing_vsan_snapshot_fails() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mds-fabric"));
    cmd.arg("facts")
        .arg("--snapshot")
        .arg(fixture("fixtures/snapshots/basic"))
        .arg("--vsan")
        .arg("30")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no output available for 'show zone status vsan 30'"));
}
