//! Init command - write a default config.

use std::path::Path;
use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::error::Result;

/// Write `.lockstep.toml` with the built-in defaults.
pub fn execute(path: &Path, force: bool) -> Result<()> {
    info!(path = %path.display(), force, "writing default config");

    Config::default().save(path, force)?;
    output::success(&format!("wrote {}", path.display()));
    Ok(())
}
