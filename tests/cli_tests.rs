//! End-to-end tests for the racesplits binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::fs;

const SPLITS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/diagonela_splits.csv");
const RACES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/races.toml");

#[test]
fn test_default_view_is_gap_to_winner() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .assert()
        .success()
        .stdout(predicate::str::contains("vs. winner of selection [min]"))
        .stdout(predicate::str::contains("Eva Zanetti"))
        .stdout(predicate::str::contains("55 km"));
}

#[test]
fn test_csv_gap_to_winner_for_selection() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-s", "Eva Zanetti", "-s", "Anna Keller"])
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("competitor,km,value_minutes\n"))
        .stdout(predicate::str::contains("Eva Zanetti,55,0.00"))
        .stdout(predicate::str::contains("Anna Keller,55,9.50"))
        .stdout(predicate::str::contains("Beat Müller").not());
}

#[test]
fn test_missing_split_is_empty_csv_cell() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-s", "Dario Sutter", "-t", "elapsed", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dario Sutter,24,\n"));
}

#[test]
fn test_pace_drops_start_column() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-t", "pace", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value_seconds_per_km"))
        .stdout(predicate::str::contains("Eva Zanetti,0,").not())
        .stdout(predicate::str::contains("Eva Zanetti,12,0.00"));
}

#[test]
fn test_json_output() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    let output = cmd
        .arg(SPLITS)
        .args(["-t", "leader", "--format", "json"])
        .args(["-r", RACES, "--race", "La Diagonela 2024"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["format"], "racesplits-json-v1");
    assert_eq!(json["transform"], "leader");
    assert_eq!(json["race"]["location"], "Zuoz");
    assert_eq!(json["competitors"].as_array().unwrap().len(), 6);
}

#[test]
fn test_seed_adds_reference_rows() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-r", RACES, "--race", "La Diagonela 2024", "--seed"])
        .args(["-s", "Anna Keller", "-s", "Engadiner, Elite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Engadiner, Elite"))
        .stdout(predicate::str::contains("Engadiner, Seed 2").not());
}

#[test]
fn test_list_races() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.args(["-r", RACES, "--list-races"])
        .assert()
        .success()
        .stdout(predicate::str::contains("La Diagonela 2024"))
        .stdout(predicate::str::contains("Engadin Skimarathon 2024"));
}

#[test]
fn test_unknown_competitor_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-s", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown competitor: Nobody"));
}

#[test]
fn test_unknown_race_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["-r", RACES, "--race", "Vasaloppet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown race: Vasaloppet"));
}

#[test]
fn test_race_without_sheet_points_to_export() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.args(["-r", RACES, "--race", "Engadin Skimarathon 2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "https://docs.google.com/spreadsheets/d/1Ab3dEfGh/export?format=csv&gid=2",
        ));
}

#[test]
fn test_malformed_time_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("bad.csv");
    fs::write(&sheet, "skier,0,10\nAnna,08:30:00,DNF\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time 'DNF' for Anna at 10 km"));
}

#[test]
fn test_single_checkpoint_sheet_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("short.csv");
    fs::write(&sheet, "skier,0\nAnna,08:30:00\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least two checkpoints"));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gaps.csv");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("racesplits");
    cmd.arg(SPLITS)
        .args(["--format", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("competitor,km,value_minutes"));
    // 6 skiers x 6 checkpoints + header
    assert_eq!(written.lines().count(), 37);
}
