//! Tests for `lockstep init` command.

use crate::support::*;

#[test]
fn test_init_writes_default_config() {
    let t = Test::new();

    let output = t.init();
    assert_success(&output);
    assert_stdout_contains(&output, "wrote .lockstep.toml");

    let config = t.read(".lockstep.toml");
    assert!(config.contains("secret_id = \"metal-env\""));
    assert!(config.contains("region = \"ap-northeast-1\""));
    assert!(config.contains("EC2_SSH_KEY"));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::new();
    assert_success(&t.init());

    let output = t.init();
    assert_failure(&output);
    assert_stderr_contains(&output, "config already exists");
}

#[test]
fn test_init_force_overwrites() {
    let t = Test::new();
    t.write(".lockstep.toml", "[remote]\nsecret_id = \"old\"\n");

    let output = t.init_force();
    assert_success(&output);

    let config = t.read(".lockstep.toml");
    assert!(config.contains("metal-env"));
    assert!(!config.contains("\"old\""));
}

#[test]
fn test_init_respects_config_flag() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "deploy.toml", "init"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.dir.path().join("deploy.toml").exists());
    assert!(!t.dir.path().join(".lockstep.toml").exists());
}
