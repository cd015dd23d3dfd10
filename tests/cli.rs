//! Command-line behaviour of the `mocha` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mocha(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mocha").unwrap();
    cmd.env_remove("MOCHA_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--database")
        .arg(dir.path().join("cli.json"));
    cmd
}

#[test]
fn test_run_then_get() {
    let dir = TempDir::new().unwrap();
    mocha(&dir).args(["run", "CREATETABLE:People"]).assert().success().stdout("OK\n");
    mocha(&dir).args(["run", "CREATECOLUMN:People:Name"]).assert().success();
    mocha(&dir).args(["run", "ADDDATA:People:Name:Alice"]).assert().success();

    mocha(&dir)
        .args(["get", "ROWCOUNT:People"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_select_renders_grid() {
    let dir = TempDir::new().unwrap();
    mocha(&dir).args(["run", "CREATETABLE:People"]).assert().success();
    mocha(&dir).args(["run", "CREATECOLUMN:People:Name"]).assert().success();
    mocha(&dir).args(["run", "ADDDATA:People:Name:Bob"]).assert().success();

    mocha(&dir)
        .args(["select", "SELECT Name FROM People"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name (String)").and(predicate::str::contains("Bob")));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    mocha(&dir)
        .args(["--json", "query", "EXISTSTABLE:Ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Bool\""));
}

#[test]
fn test_errors_exit_with_code_one() {
    let dir = TempDir::new().unwrap();
    mocha(&dir)
        .args(["run", "GETTABLES"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Command error: invalid query"));

    mocha(&dir)
        .args(["get", "GETTABLE:Ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_read_only_missing_database() {
    let dir = TempDir::new().unwrap();
    mocha(&dir)
        .args(["--read-only", "get", "TABLECOUNT"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not found"));
    assert!(!dir.path().join("cli.json").exists());
}

#[test]
fn test_script_and_check() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("setup.mocha");
    std::fs::write(
        &script,
        "-- setup\nCREATETABLE:T\nCREATECOLUMN:T:N:Int32\n\nADDDATA:T:N:5\nDATACOUNT:T:N\n",
    )
    .unwrap();

    mocha(&dir)
        .arg("check")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 command(s) OK"));

    mocha(&dir)
        .arg("script")
        .arg(&script)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_script_stops_at_first_error() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("bad.mocha");
    std::fs::write(&script, "CREATETABLE:A\nCREATETABLE:A\nCREATETABLE:B\n").unwrap();

    mocha(&dir)
        .arg("script")
        .arg(&script)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));

    mocha(&dir)
        .args(["get", "EXISTSTABLE:B"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_check_rejects_unknown_keyword() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("bad.mocha");
    std::fs::write(&script, "DROPTABLE:A\nCLEARALL\n").unwrap();

    mocha(&dir)
        .arg("check")
        .arg(&script)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR (line 1)").and(predicate::str::contains("WARNING (line 2)")));
    assert!(!dir.path().join("cli.json").exists());
}

#[test]
fn test_script_requires_mocha_extension() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("setup.txt");
    std::fs::write(&script, "CREATETABLE:T\n").unwrap();

    mocha(&dir)
        .arg("script")
        .arg(&script)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".mocha extension"));
    mocha(&dir).arg("check").arg(&script).assert().code(1);
    assert!(!dir.path().join("cli.json").exists());
}

#[test]
fn test_get_runs_mutations() {
    let dir = TempDir::new().unwrap();
    mocha(&dir).args(["get", "CREATETABLE:People"]).assert().success().stdout("OK\n");
    mocha(&dir)
        .args(["get", "REMOVETABLE:People"])
        .assert()
        .success()
        .stdout("true\n");
}
