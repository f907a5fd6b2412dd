//! CLI commands exercised as a black box against a temporary database.

use predicates::prelude::*;

mod helpers;
use helpers::{strip_ansi, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("task scheduler"))
        .stdout(predicate::str::contains("serve"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("planner"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_next_prints_the_next_date() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["next", "--date", "20240113", "--repeat", "d 7", "--now", "20240126"])
        .stdout("20240127\n");
    harness
        .run_success(&["next", "--date", "20240126", "--repeat", "w 5", "--now", "20240126"])
        .stdout("20240202\n");
    harness
        .run_success(&["next", "--date", "20240131", "--repeat", "m -1", "--now", "20240201"])
        .stdout("20240229\n");

    // The query does not need a database.
    assert!(!harness.db_path().exists());
}

#[test]
fn test_next_reports_rule_errors() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["next", "--date", "20240126", "--repeat", "w", "--now", "20240126"])
        .stderr(predicate::str::contains("Invalid repeat rule format"));
    harness
        .run_failure(&["next", "--date", "20240126", "--repeat", "d 400", "--now", "20240126"])
        .stderr(predicate::str::contains("Invalid daily interval"));
    harness
        .run_failure(&["next", "--date", "2024-01-26", "--repeat", "y"])
        .stderr(predicate::str::contains("expected YYYYMMDD"));
}

#[test]
fn test_add_and_list() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["add", "Buy milk", "--date", "20991231", "--comment", "2 litres"])
        .stdout(predicate::str::contains("Added task"));
    harness.add_task(&["Renew passport", "--date", "20990115", "--repeat", "y"]);

    let output = harness.run_success(&["list"]).get_output().stdout.clone();
    let text = strip_ansi(&String::from_utf8_lossy(&output));
    assert!(text.contains("Buy milk"));
    assert!(text.contains("2 litres"));
    let passport = text.find("Renew passport").unwrap();
    let milk = text.find("Buy milk").unwrap();
    assert!(passport < milk, "tasks are listed by date");

    harness
        .run_success(&["list", "milk"])
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Renew passport").not());
    harness
        .run_success(&["list", "15.01.2099"])
        .stdout(predicate::str::contains("Renew passport"))
        .stdout(predicate::str::contains("Buy milk").not());
    harness
        .run_success(&["list", "--limit", "1"])
        .stdout(predicate::str::contains("Buy milk").not());
}

#[test]
fn test_add_rejects_invalid_input() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["add", "Gym", "--repeat", "x 1"])
        .stderr(predicate::str::contains("Unsupported repeat rule kind"));
    harness
        .run_failure(&["add", "Gym", "--repeat", "w 8"])
        .stderr(predicate::str::contains("Invalid day of week"));
    harness
        .run_failure(&["add", "  "])
        .stderr(predicate::str::contains("title is required"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_done_removes_one_off_tasks() {
    let harness = CliTestHarness::new();
    let id = harness.add_task(&["Call mom", "--date", "20991231"]);

    harness
        .run_success(&["done", &id])
        .stdout(predicate::str::contains("Completed task: 'Call mom'"));
    harness
        .run_failure(&["show", &id])
        .stderr(predicate::str::contains("No task found"));
}

#[test]
fn test_done_reschedules_repeating_tasks() {
    let harness = CliTestHarness::new();
    let id = harness.add_task(&["Stretch", "--date", "20991231", "--repeat", "d 1"]);

    harness
        .run_success(&["done", &id])
        .stdout(predicate::str::contains("Next due"))
        .stdout(predicate::str::contains("21000101"));
    harness
        .run_success(&["show", &id])
        .stdout(predicate::str::contains("21000101"))
        .stdout(predicate::str::contains("d 1"));
}

#[test]
fn test_edit_task() {
    let harness = CliTestHarness::new();
    let id = harness.add_task(&["Dentist", "--date", "20990301", "--repeat", "m 1"]);

    harness
        .run_success(&["edit", &id, "--title", "Dentist checkup", "--no-repeat"])
        .stdout(predicate::str::contains("Updated task"))
        .stdout(predicate::str::contains("No longer repeats"));
    harness
        .run_success(&["show", &id])
        .stdout(predicate::str::contains("Dentist checkup"))
        .stdout(predicate::str::contains("does not repeat"));

    harness
        .run_failure(&["edit", &id])
        .stderr(predicate::str::contains("Nothing to change"));
    harness
        .run_failure(&["edit", &id, "--repeat", "m 0"])
        .stderr(predicate::str::contains("Invalid day of month"));
}

#[test]
fn test_delete_task() {
    let harness = CliTestHarness::new();
    let id = harness.add_task(&["Old task", "--date", "20991231"]);

    harness
        .run_success(&["delete", &id, "--force"])
        .stdout(predicate::str::contains("Deleted task: 'Old task'"));
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_short_id_validation() {
    let harness = CliTestHarness::new();
    harness.add_task(&["Anything", "--date", "20991231"]);

    harness
        .run_failure(&["done", "a"])
        .stderr(predicate::str::contains("at least 2 characters"));
    harness
        .run_failure(&["show", "zz"])
        .stderr(predicate::str::contains("No task found"));
}
