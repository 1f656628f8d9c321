use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finboard(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finboard").expect("binary");
    cmd.env("FINBOARD_DATA_DIR", data_dir.path())
        .env_remove("FINBOARD_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("allocation"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("analytics"));
}

#[test]
fn allocation_defaults_work_offline() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["allocation", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn allocation_set_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["allocation", "set", "40", "30", "20", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allocation saved."));

    finboard(&dir)
        .args(["allocation", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40.00%"))
        .stdout(predicate::str::contains("30.00%"));
}

#[test]
fn allocation_set_rejects_bad_sum() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["allocation", "set", "30", "30", "30", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("percentages must sum to 100"));

    finboard(&dir)
        .args(["allocation", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn config_shows_api_override() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["--api-url", "http://example.test/api", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.test/api"))
        .stdout(predicate::str::contains("Signed in:       no"));
}

#[test]
fn record_commands_need_a_session() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finboard login"));
}

#[test]
fn logout_without_session_is_harmless() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}
