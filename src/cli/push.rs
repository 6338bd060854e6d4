//! Push command - source file to remote store, then read back.

use std::path::PathBuf;
use tracing::info;

use crate::cli::{output, print_report, remote_sync, runtime};
use crate::core::config::Config;
use crate::core::pipeline;
use crate::error::Result;

/// Upsert the source file as the remote record and print what was committed.
pub fn execute(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let source = file.unwrap_or_else(|| config.source.file.clone());
    let id = config.remote.secret_id.as_str();
    info!(source = %source.display(), id, "running push");

    let result = runtime()?.block_on(async {
        let remote = remote_sync(config).await;
        pipeline::push(&remote, id, &source).await
    })?;

    if result.record.was_created() {
        output::success(&format!("created {}", output::key(id)));
    } else {
        output::success(&format!("updated {}", output::key(id)));
    }

    if !result.verified() {
        output::warn("read-back differs from the source file");
    }

    print_report("Registered secrets", &result.committed, config);
    Ok(())
}
