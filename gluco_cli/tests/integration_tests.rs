//! Integration tests for the sugarpilot binary.
//!
//! These tests verify end-to-end behavior including:
//! - Manual-carb dose calculation and recording
//! - Dry-run and validation behavior
//! - History management and CSV export
//! - Settings persistence across runs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sugarpilot"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("insulin dose calculator"));
}

#[test]
fn test_manual_dose_worked_example() {
    let temp_dir = setup_test_dir();

    // tdd=40, ccr=500: carbs 30+10 at glucose 200 gives 3.2 + 2 -> 5.0
    cli()
        .arg("dose")
        .arg("2 chapatis and dal")
        .arg("--glucose")
        .arg("200")
        .arg("--carbs")
        .arg("30")
        .arg("--carbs")
        .arg("10")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("RECOMMENDED DOSE: 5 U"))
        .stdout(predicate::str::contains("Total carbs: 40g"))
        .stdout(predicate::str::contains("Correction:   +2 U"))
        .stdout(predicate::str::contains("Recorded to history"));

    // Verify the history file has content
    let history = fs::read_to_string(temp_dir.path().join("history.json"))
        .expect("Failed to read history");
    assert!(history.contains("2 chapatis and dal"));
}

#[test]
fn test_dry_run_does_not_record() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("one apple")
        .arg("--carbs")
        .arg("15")
        .arg("--dry-run")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp_dir.path().join("history.json").exists());
}

#[test]
fn test_blank_meal_is_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("   ")
        .arg("--carbs")
        .arg("10")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please describe what you ate."));

    assert!(!temp_dir.path().join("history.json").exists());
}

#[test]
fn test_missing_api_key_fails_ai_path() {
    let temp_dir = setup_test_dir();

    // No --carbs means the Gemini parser is needed, which needs a key
    cli()
        .env_remove("GEMINI_API_KEY")
        .arg("dose")
        .arg("one apple")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_share_prints_summary_block() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("2 idlis with sambar")
        .arg("--glucose")
        .arg("160")
        .arg("--carbs")
        .arg("30")
        .arg("--share")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SugarPilot Summary"))
        .stdout(predicate::str::contains("BG: 160 mg/dL"))
        .stdout(predicate::str::contains("Shared via SugarPilot"));
}

#[test]
fn test_history_list_shows_recorded_entries() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("dosa and chutney")
        .arg("--carbs")
        .arg("25")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dosa and chutney"));
}

#[test]
fn test_history_remove_unknown_id_is_soft() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("history")
        .arg("remove")
        .arg(uuid::Uuid::new_v4().to_string())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"));
}

#[test]
fn test_history_clear() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("rice")
        .arg("--carbs")
        .arg("30")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("clear")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared"));

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations recorded yet."));
}

#[test]
fn test_history_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("export.csv");

    cli()
        .arg("dose")
        .arg("poha")
        .arg("--carbs")
        .arg("20")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));

    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.starts_with("id,timestamp,meal"));
    assert!(contents.contains("poha"));
}

#[test]
fn test_settings_persist_across_runs() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("settings")
        .arg("set")
        .arg("--tdd")
        .arg("50")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings updated"));

    cli()
        .arg("settings")
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TDD:           50 U"));
}

#[test]
fn test_insulin_switch_resets_isf() {
    let temp_dir = setup_test_dir();

    // Customize the ISF constant first
    cli()
        .arg("settings")
        .arg("set")
        .arg("--isf")
        .arg("1650")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    // Switching type must overwrite the custom value
    cli()
        .arg("settings")
        .arg("insulin")
        .arg("regular")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1500"));

    cli()
        .arg("settings")
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ISF constant:  1500"))
        .stdout(predicate::str::contains("Regular"));
}

#[test]
fn test_non_positive_tdd_floors_at_one() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("settings")
        .arg("set")
        .arg("--tdd")
        .arg("0")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TDD:           1 U"));
}

#[test]
fn test_status_shows_profile_and_recent() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dose")
        .arg("upma")
        .arg("--carbs")
        .arg("22")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile:"))
        .stdout(predicate::str::contains("Recent calculations:"))
        .stdout(predicate::str::contains("upma"));
}

#[test]
fn test_theme_persists() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("settings")
        .arg("theme")
        .arg("dark")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));

    cli()
        .arg("settings")
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme:         dark"));
}
