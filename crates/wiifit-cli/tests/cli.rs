use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wiifit"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.dat")
}

#[test]
fn help_supports_extract_and_export() {
    cmd()
        .arg("save")
        .arg("extract")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("save")
        .arg("export")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("FitPlus0.dat");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["summary"]["profiles_total"], 1);
    assert_eq!(report["profiles"][0]["records"][0]["bmi"], 21.45);
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_is_written_into_new_directory() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("corrupt_header"))
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["profiles"][0]["name"], "Ana");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn list_discarded_outputs_reasons() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("truncated"))
        .arg("-o")
        .arg(report)
        .arg("--list-discarded")
        .assert()
        .success()
        .stderr(contains("Discarded slots:").and(contains("end of stream")));
}

#[test]
fn strict_fails_when_a_slot_fails_to_decode() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("corrupt_header"))
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("1 slot(s) failed to decode").and(contains("hint:")));
}

#[test]
fn strict_accepts_unused_slots() {
    let assert = cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("--stdout")
        .arg("--strict")
        .arg("--list-discarded")
        .assert()
        .success()
        .stderr(contains("Discarded slots: none"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["summary"]["slots_empty"], 1);
    assert_eq!(report["summary"]["slots_discarded"], 0);
    assert!(report.get("discarded").is_none());
}

#[test]
fn show_prints_profiles() {
    cmd()
        .arg("save")
        .arg("show")
        .arg(fixture("two_slots"))
        .assert()
        .success()
        .stdout(
            contains("Mii: Tristan")
                .and(contains("DOB: 1990-06-15"))
                .and(contains("2015-06-15 09:30:00, 72.3kg, 21.45, 50.1%")),
        );
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("FitPlus0.dat");
    std::fs::copy(fixture("two_slots"), &input).expect("copy fixture");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn existing_report_is_overwritten() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");
    std::fs::write(&report, "stale").expect("seed report");

    cmd()
        .arg("save")
        .arg("extract")
        .arg(fixture("two_slots"))
        .arg("-o")
        .arg(&report)
        .arg("--quiet")
        .assert()
        .success();

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["profiles"][0]["name"], "Tristan");
}
