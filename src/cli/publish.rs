//! Publish command - remote record to GitHub Actions secrets.

use tracing::info;

use crate::cli::{output, remote_sync, runtime};
use crate::core::ci::{self, CiSecretPublisher, GithubClient};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::PublishOutcome;
use crate::core::pipeline;
use crate::error::Result;

/// Seal and publish the allow-listed variables to the repository.
///
/// The token is checked before any network call.
pub fn execute(
    config: &Config,
    owner: Option<String>,
    repo: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let token = ci::require_token(token, constants::GITHUB_TOKEN_VAR)?;
    let owner = owner.unwrap_or_else(|| config.github.owner.clone());
    let repo = repo.unwrap_or_else(|| config.github.repo.clone());
    let id = config.remote.secret_id.as_str();
    info!(id, %owner, %repo, "running publish");

    let client = GithubClient::new(&config.github.api_url, token)?;
    let publisher = CiSecretPublisher::new(client, owner.clone(), repo.clone());

    let summary = runtime()?.block_on(async {
        let remote = remote_sync(config).await;
        pipeline::publish_ci(&remote, id, &publisher, &config.github.required).await
    })?;

    for outcome in &summary.outcomes {
        match outcome {
            PublishOutcome::Published { name } => {
                output::success(&format!("published {}", output::key(name)))
            }
            PublishOutcome::Skipped { name } => {
                output::warn(&format!("{} is not in {}, skipped", output::key(name), id))
            }
            PublishOutcome::Failed { name, stage, error } => {
                output::error(&format!(
                    "failed to {} {}: {}",
                    stage,
                    output::key(name),
                    error
                ));
            }
        }
    }

    output::section(&format!("{}/{}", owner, repo));
    output::dimmed(&format!(
        "{} published, {} skipped, {} failed",
        summary.published(),
        summary.skipped(),
        summary.failed()
    ));
    Ok(())
}
