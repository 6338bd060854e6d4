//! The real host environment.
//!
//! - Windows: privilege is probed with `net session`, variables are written
//!   with `setx NAME VALUE /M` (the system hive).
//! - Unix: privilege means effective uid 0, variables are upserted into
//!   `/etc/environment` as `NAME="value"` lines. Values pam_env cannot
//!   read back exactly are refused per key.

#[cfg(unix)]
use std::path::{Path, PathBuf};
#[cfg(windows)]
use std::process::{Command, Stdio};
use tracing::trace;

use super::HostEnvironment;
use crate::error::HostError;

/// Host environment of the machine lockstep runs on.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    #[cfg(unix)]
    environment_file: PathBuf,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            environment_file: PathBuf::from(crate::core::constants::UNIX_ENVIRONMENT_FILE),
        }
    }

    /// Write bindings to `path` instead of `/etc/environment`.
    #[cfg(unix)]
    pub fn with_environment_file(path: impl Into<PathBuf>) -> Self {
        Self {
            environment_file: path.into(),
        }
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for SystemEnvironment {
    #[cfg(unix)]
    fn has_elevated_privilege(&self) -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    fn has_elevated_privilege(&self) -> bool {
        Command::new("net")
            .arg("session")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[cfg(unix)]
    fn set_persistent_variable(&self, name: &str, value: &str) -> Result<(), HostError> {
        trace!(name, path = %self.environment_file.display(), "writing environment file");
        upsert_environment_line(&self.environment_file, name, value)
    }

    #[cfg(windows)]
    fn set_persistent_variable(&self, name: &str, value: &str) -> Result<(), HostError> {
        trace!(name, "setx /M");
        let output = Command::new("setx")
            .args([name, value, "/M"])
            .stdin(Stdio::null())
            .output()
            .map_err(|source| HostError::Spawn {
                command: "setx",
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let reason = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(HostError::SetFailed {
            key: name.to_string(),
            reason,
        })
    }
}

/// Characters `/etc/environment` cannot carry through to a session.
///
/// pam_env decodes no escapes there and treats `#` as a comment.
#[cfg(unix)]
const UNREPRESENTABLE: &[(char, &str)] = &[
    ('\n', "multi-line values"),
    ('\r', "multi-line values"),
    ('"', "double quotes"),
    ('\\', "backslashes"),
    ('#', "'#'"),
];

/// Replace or append the `name=` line of a pam_env style file.
#[cfg(unix)]
fn upsert_environment_line(path: &Path, name: &str, value: &str) -> Result<(), HostError> {
    if let Some((_, what)) = UNREPRESENTABLE.iter().find(|(c, _)| value.contains(*c)) {
        return Err(HostError::SetFailed {
            key: name.to_string(),
            reason: format!("{} cannot hold {}", path.display(), what),
        });
    }

    let file_error = |source| HostError::EnvironmentFile {
        path: path.display().to_string(),
        source,
    };

    let existing = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(file_error(e)),
    };

    let line = format!("{}=\"{}\"", name, value);
    let prefix = format!("{}=", name);

    let mut replaced = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|l| {
            if !replaced && l.trim_start().starts_with(&prefix) {
                replaced = true;
                line.clone()
            } else {
                l.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(line);
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(path, contents).map_err(file_error)
}
