use assert_cmd::Command;
use predicates::prelude::*;

fn skyhop() -> Command {
    let mut cmd = Command::cargo_bin("skyhop").unwrap();
    // Keep ambient credentials out of the test environment.
    cmd.env_remove("GOOGLE_CLOUD_PROJECT");
    cmd.env_remove("SKYHOP_ACCESS_TOKEN");
    cmd
}

#[test]
fn help_lists_the_three_commands() {
    skyhop()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("clone"))
        .stdout(predicate::str::contains("relay"));
}

#[test]
fn up_help_shows_defaults() {
    skyhop()
        .arg("up")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--zone"))
        .stdout(predicate::str::contains("us-west1-b"))
        .stdout(predicate::str::contains("--machine-type"))
        .stdout(predicate::str::contains("e2-medium"));
}

#[test]
fn clone_help_shows_count_and_report() {
    skyhop()
        .arg("clone")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--snapshot-prefix"))
        .stdout(predicate::str::contains("--report"));
}

#[test]
fn up_without_project_fails_with_a_hint() {
    skyhop()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not set"));
}

#[test]
fn relay_requires_the_payload_files() {
    skyhop()
        .arg("relay")
        .arg("--project")
        .arg("proj")
        .arg("--access-token")
        .arg("token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--startup-script"));
}

#[test]
fn invalid_command_fails() {
    skyhop().arg("warp").assert().failure();
}
