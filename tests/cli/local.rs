//! Tests for `lockstep local` command.

use crate::support::*;
use lockstep::core::host::{HostEnvironment, SystemEnvironment};

#[test]
fn test_local_requires_elevation() {
    if SystemEnvironment::new().has_elevated_privilege() {
        eprintln!("skipping: running with elevated privilege");
        return;
    }
    let t = Test::new();

    let output = t.local();
    assert_failure(&output);
    assert_stderr_contains(&output, "administrator privileges are required");
    // Refused before the warning and before the remote is contacted.
    assert!(!stdout(&output).contains("machine-wide environment variables for every user"));
}

#[test]
fn test_local_help_mentions_confirmation() {
    let t = Test::new();

    let output = t.cmd().args(["local", "--help"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "--yes");
}
