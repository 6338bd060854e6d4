//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a lockstep command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test project directory
    /// - No GitHub token, a fixed AWS region, and colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("lockstep").expect("failed to find lockstep binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("GITHUB_TOKEN");
        cmd.env_remove("LOCKSTEP_LOG");
        cmd.env("AWS_REGION", "ap-northeast-1");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `lockstep init`.
    pub fn init(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run lockstep init")
    }

    /// Shortcut for `lockstep init --force`.
    pub fn init_force(&self) -> Output {
        self.cmd()
            .args(["init", "--force"])
            .output()
            .expect("failed to run lockstep init --force")
    }

    /// Shortcut for `lockstep push --file <file>`.
    pub fn push_file(&self, file: &str) -> Output {
        self.cmd()
            .args(["push", "--file", file])
            .output()
            .expect("failed to run lockstep push")
    }

    /// Shortcut for `lockstep publish` without a token.
    pub fn publish(&self) -> Output {
        self.cmd()
            .arg("publish")
            .output()
            .expect("failed to run lockstep publish")
    }

    /// Shortcut for `lockstep local --yes`.
    pub fn local(&self) -> Output {
        self.cmd()
            .args(["local", "--yes"])
            .output()
            .expect("failed to run lockstep local")
    }
}
