use assert_cmd::Command;
use chrono::Datelike;
use predicates::prelude::*;

/// Build a `tally` invocation pointed at an isolated config dir so tests
/// never touch the real ~/.config.
fn tally(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CONFIG_DIR", config);
    cmd
}

struct Workspace {
    _dir: tempfile::TempDir,
    config: std::path::PathBuf,
}

fn setup() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");

    tally(&config)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tally"));

    Workspace {
        _dir: dir,
        config,
    }
}

#[test]
fn tracks_income_expenses_and_balance() {
    let ws = setup();

    tally(&ws.config)
        .args(["income", "add", "Salary", "2500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income #1: Salary $2,500.00"));

    tally(&ws.config)
        .args(["expense", "add", "Groceries", "150.25"])
        .assert()
        .success();

    tally(&ws.config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income:      $2,500.00"))
        .stdout(predicate::str::contains("Balance:           $2,349.75"));
}

#[test]
fn rejects_invalid_input_without_writing() {
    let ws = setup();

    tally(&ws.config)
        .args(["income", "add", "Salary", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot be negative"));

    tally(&ws.config)
        .args(["expense", "add", "", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));

    tally(&ws.config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Income entries:    0"))
        .stdout(predicate::str::contains("Expense entries:   0"));
}

#[test]
fn purchase_bought_records_expense_once() {
    let ws = setup();

    tally(&ws.config)
        .args(["purchase", "add", "Laptop", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added planned purchase #1"));

    tally(&ws.config)
        .args(["purchase", "bought", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked #1 bought"));

    tally(&ws.config)
        .args(["purchase", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yes"));

    tally(&ws.config)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laptop"));

    // A second attempt is a conflict and records nothing new.
    tally(&ws.config)
        .args(["purchase", "bought", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already marked as bought"));
}

#[test]
fn recurring_run_is_idempotent_within_a_day() {
    let ws = setup();
    let day = chrono::Local::now().day().to_string();

    tally(&ws.config)
        .args(["income", "add", "Salary", "1000", "--recurring-day", &day])
        .assert()
        .success();

    tally(&ws.config)
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income: 1 recurring"));

    tally(&ws.config)
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income: 0 recurring"));
}

#[test]
fn budget_threshold_alert_fires() {
    let ws = setup();

    tally(&ws.config)
        .args(["threshold", "set", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget threshold set to $100.00"));

    tally(&ws.config)
        .args(["expense", "add", "Concert tickets", "150"])
        .assert()
        .success()
        .stderr(predicate::str::contains("expenses have reached $150.00"));
}

#[test]
fn clear_all_and_reset() {
    let ws = setup();

    tally(&ws.config)
        .args(["income", "add", "Salary", "100"])
        .assert()
        .success();

    tally(&ws.config)
        .arg("clear-all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all data"));

    tally(&ws.config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income:      $0.00"));

    tally(&ws.config)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database deleted"));

    tally(&ws.config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"));
}
