//! General CLI surface tests.

mod support;
use support::*;

#[test]
fn help_lists_subcommands() {
    let t = Test::new();
    let output = t.cmd().arg("--help").output().expect("failed to run kiln");
    assert_success(&output);

    for subcommand in ["run", "test", "seed", "snapshot", "build", "compile", "exec", "env", "status"] {
        assert_stdout_contains(&output, subcommand);
    }
}

#[test]
fn version_flag_works() {
    let t = Test::new();
    let output = t.cmd().arg("--version").output().expect("failed to run kiln");
    assert_success(&output);
    assert_stdout_contains(&output, "kiln");
}

#[test]
fn completions_generate_for_bash() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["completions", "bash"])
        .output()
        .expect("failed to run kiln completions");
    assert_success(&output);
    assert_stdout_contains(&output, "kiln");
}

#[test]
fn about_mentions_credential_resolution() {
    use predicates::prelude::*;

    let t = Test::new();
    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials"));
}

#[test]
fn unknown_subcommand_fails() {
    let t = Test::new();
    let output = t.cmd().arg("smelt").output().expect("failed to run kiln");
    assert_failure(&output);
}

#[test]
fn missing_subcommand_shows_usage() {
    let t = Test::new();
    let output = t.cmd().output().expect("failed to run kiln");
    assert_failure(&output);
    assert_stderr_contains(&output, "Usage");
}
