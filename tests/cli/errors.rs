//! Tests for failures that must stop before any network call.

use crate::support::*;

#[test]
fn test_malformed_config_fails() {
    let t = Test::new();
    t.write(".lockstep.toml", "[remote\nsecret_id = ");

    let output = t.cmd().arg("show").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_empty_secret_id_rejected() {
    let t = Test::new();
    t.write(".lockstep.toml", "[remote]\nsecret_id = \"\"\n");

    let output = t.cmd().arg("show").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "remote.secret_id must not be empty");
}

#[test]
fn test_publish_without_token_fails() {
    let t = Test::new();

    let output = t.publish();
    assert_failure(&output);
    assert_stderr_contains(&output, "GITHUB_TOKEN is not set");
    assert_stdout_contains(&output, "export GITHUB_TOKEN=");
}

#[test]
fn test_publish_blank_token_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .arg("publish")
        .env("GITHUB_TOKEN", "   ")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "GITHUB_TOKEN is not set");
}

#[test]
fn test_push_missing_source_fails() {
    let t = Test::new();

    let output = t.push_file("missing.env");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read missing.env");
}

#[test]
fn test_push_source_with_bad_line_fails() {
    let t = Test::new();
    t.write("broken.env", "GOOD=1\nthis line has no equals sign\n");

    let output = t.push_file("broken.env");
    assert_failure(&output);
    assert_stderr_contains(&output, "broken.env:2: expected KEY=VALUE");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("deploy").output().unwrap();
    assert!(!output.status.success());
    assert_stderr_contains(&output, "unrecognized subcommand");
}
