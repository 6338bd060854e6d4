//! Command-line interface.

pub mod completions;
pub mod init;
pub mod local;
pub mod output;
pub mod publish;
pub mod push;
pub mod show;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::{MaskPolicy, Report, SecretSet};
use crate::core::remote::{RemoteStoreSync, SecretsManager};
use crate::error::Result;

/// Lockstep - keep one secret set in sync across AWS, this host, and CI.
#[derive(Parser)]
#[command(
    name = "lockstep",
    about = "Keep one secret set in sync across AWS Secrets Manager, this host, and GitHub Actions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, default_value = constants::CONFIG_FILE)]
    pub config: PathBuf,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a default .lockstep.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Upload a .env file to the remote secret store and read it back
    Push {
        /// Source file (defaults to source.file from the config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the remote secret record with sensitive values masked
    Show,

    /// Set the remote secrets as machine-wide environment variables
    Local {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Publish the required variables to GitHub Actions secrets
    Publish {
        /// Repository owner (defaults to github.owner from the config)
        #[arg(long)]
        owner: Option<String>,
        /// Repository name (defaults to github.repo from the config)
        #[arg(long)]
        repo: Option<String>,
        /// GitHub token with permission to write repository secrets
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config_path: &Path) -> Result<()> {
    use Command::*;

    match command {
        Init { force } => init::execute(config_path, force),
        Push { file } => push::execute(&Config::load(config_path)?, file),
        Show => show::execute(&Config::load(config_path)?),
        Local { yes } => local::execute(&Config::load(config_path)?, yes),
        Publish { owner, repo, token } => {
            publish::execute(&Config::load(config_path)?, owner, repo, token)
        }
        Completions { shell } => completions::execute(shell),
    }
}

/// Single-threaded runtime; every remote call is awaited in turn.
pub(crate) fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Remote store sync for the configured region and description.
pub(crate) async fn remote_sync(config: &Config) -> RemoteStoreSync<SecretsManager> {
    let store = SecretsManager::new(&config.remote.region()).await;
    RemoteStoreSync::new(store, config.remote.description.clone())
}

/// Print a secret set with sensitive values masked.
pub(crate) fn print_report(title: &str, secrets: &SecretSet, config: &Config) {
    let report = Report::new(secrets, &MaskPolicy::from(&config.report));

    output::section(title);
    if report.is_empty() {
        output::dimmed("no secrets stored");
        return;
    }
    for line in report.lines() {
        output::list_item(&line);
    }
}
