mod common;

use assert_cmd::Command;
use common::TestEnv;
use predicates::str::contains;

#[test]
fn status_text_mode_names_the_workspace() {
    let env = TestEnv::new();
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("workspace:"))
        .stdout(contains("database:\tabsent"));
}

#[test]
fn request_scan_text_mode_reports_the_command_file() {
    let env = TestEnv::new();
    env.cmd()
        .arg("request-scan")
        .assert()
        .success()
        .stdout(contains("scan requested via"))
        .stdout(contains("start_scan.txt"));
}

#[test]
fn missing_workspace_is_a_configuration_error() {
    let tmp = tempfile::TempDir::new().expect("temp home");
    Command::cargo_bin("scanrunner")
        .expect("binary under test")
        .env("HOME", tmp.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(contains("no workspace configured"));
}
