use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mission(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mission").unwrap();
    cmd.env("MISSION_TRACKER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn deposit_and_withdraw_update_balance() {
    let dir = TempDir::new().unwrap();

    mission(&dir)
        .args(["deposit", "100", "-d", "Salary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deposit +৳100.00 (Salary)"))
        .stdout(predicate::str::contains("Balance: ৳100.00"));

    mission(&dir)
        .args(["withdraw", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Expense) on mission day 1"))
        .stdout(predicate::str::contains("Balance: ৳70.00"));

    mission(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:         ৳70.00"))
        .stdout(predicate::str::contains("Spent today:     ৳30.00"))
        .stdout(predicate::str::contains("day 1/14"));

    assert!(dir.path().join("data").join("state.json").exists());
    assert!(dir.path().join("audit.log").exists());
}

#[test]
fn overdraw_fails_without_changing_balance() {
    let dir = TempDir::new().unwrap();
    mission(&dir).args(["deposit", "30"]).assert().success();

    mission(&dir)
        .args(["withdraw", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient balance"));

    mission(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("৳30.00"));
}

#[test]
fn rejects_non_numeric_amount() {
    let dir = TempDir::new().unwrap();
    mission(&dir)
        .args(["deposit", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn target_and_grid() {
    let dir = TempDir::new().unwrap();
    mission(&dir)
        .args(["target", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily target set to ৳40.00 from day 1"));

    mission(&dir)
        .arg("mission")
        .assert()
        .success()
        .stdout(predicate::str::contains("৳40.00"))
        .stdout(predicate::str::contains("0 over budget"));
}

#[test]
fn history_and_delete() {
    let dir = TempDir::new().unwrap();
    mission(&dir).args(["deposit", "50", "-d", "Gift"]).assert().success();
    let output = mission(&dir)
        .args(["withdraw", "12.5", "-d", "Lunch"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout
        .split('[')
        .nth(1)
        .and_then(|rest| rest.split(']').next())
        .unwrap()
        .to_string();
    assert!(id.starts_with("txn-"));

    mission(&dir)
        .args(["history", "-f", "withdrawals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("Gift").not());

    mission(&dir)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: ৳50.00"));

    mission(&dir)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn export_then_import() {
    let source = TempDir::new().unwrap();
    mission(&source).args(["deposit", "75"]).assert().success();
    mission(&source).args(["withdraw", "25"]).assert().success();

    let file = source.path().join("backup.json");
    mission(&source)
        .args(["export", file.to_str().unwrap(), "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 transaction(s) as json"));

    let target = TempDir::new().unwrap();
    mission(&target)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transaction(s)"))
        .stdout(predicate::str::contains("Balance: ৳50.00"));
}

#[test]
fn import_of_incomplete_document_fails() {
    let dir = TempDir::new().unwrap();
    mission(&dir).args(["deposit", "10"]).assert().success();

    let file = dir.path().join("partial.json");
    std::fs::write(&file, r#"{"balance": "500.00", "transactions": []}"#).unwrap();

    mission(&dir)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("currentMission"));

    mission(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("৳10.00"));
}

#[test]
fn csv_export() {
    let dir = TempDir::new().unwrap();
    mission(&dir).args(["deposit", "20", "-d", "Cash"]).assert().success();

    let file = dir.path().join("ledger.csv");
    mission(&dir)
        .args(["export", file.to_str().unwrap()])
        .assert()
        .success();

    let text = std::fs::read_to_string(file).unwrap();
    assert!(text.starts_with("ID,Date,Time,Kind,Description,Amount"));
    assert!(text.contains(",Deposit,Cash,20.00"));
}

#[test]
fn watch_runs_for_fixed_ticks() {
    let dir = TempDir::new().unwrap();
    mission(&dir)
        .args(["watch", "--ticks", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watching mission"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();
    mission(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("state.json"))
        .stdout(predicate::str::contains("Currency symbol:       ৳"));
}

#[test]
fn audit_log_lists_changes() {
    let dir = TempDir::new().unwrap();
    mission(&dir).args(["deposit", "5"]).assert().success();
    mission(&dir)
        .args(["audit", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"));
}
