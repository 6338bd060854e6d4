//! Show command - print the remote record, masked.

use tracing::info;

use crate::cli::{print_report, remote_sync, runtime};
use crate::core::config::Config;
use crate::error::Result;

/// Fetch and print the remote record.
pub fn execute(config: &Config) -> Result<()> {
    let id = config.remote.secret_id.as_str();
    info!(id, "running show");

    let secrets = runtime()?.block_on(async { remote_sync(config).await.fetch(id).await })?;

    print_report(id, &secrets, config);
    Ok(())
}
