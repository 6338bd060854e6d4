//! Local command - remote record to machine-wide environment variables.

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use tracing::info;

use crate::cli::{output, remote_sync, runtime};
use crate::core::config::Config;
use crate::core::domain::ApplyOutcome;
use crate::core::host::{LocalEnvironmentApplier, SystemEnvironment};
use crate::core::pipeline;
use crate::error::{Error, Result};

/// Bind every remote secret as a persistent, host-global variable.
///
/// The privilege check runs before the prompt and before the remote read.
pub fn execute(config: &Config, yes: bool) -> Result<()> {
    let id = config.remote.secret_id.as_str();
    info!(id, "running local");

    let applier = LocalEnvironmentApplier::new(SystemEnvironment::new());
    let elevated = applier.elevate()?;

    output::warn("this sets machine-wide environment variables for every user and process");
    if !yes {
        if !io::stdin().is_terminal() {
            return Err(Error::Aborted("not a terminal, pass --yes to confirm"));
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Apply {} to this machine?", output::key(id)))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("nothing changed");
            return Ok(());
        }
    }

    let summary = runtime()?.block_on(async {
        let remote = remote_sync(config).await;
        pipeline::apply_local(&remote, id, &elevated).await
    })?;

    for outcome in &summary.outcomes {
        match outcome {
            ApplyOutcome::Applied { key } => output::success(&format!("set {}", output::key(key))),
            ApplyOutcome::Failed { key, error } => {
                output::error(&format!("failed to set {}: {}", output::key(key), error))
            }
        }
    }

    output::section("Summary");
    output::dimmed(&format!(
        "{} set, {} failed",
        summary.applied(),
        summary.failed()
    ));
    output::warn("open a new terminal or session to see the new variables");
    Ok(())
}
