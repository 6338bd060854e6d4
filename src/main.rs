//! Lockstep - keep one secret set in sync across every place it is consumed.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lockstep::cli::output;
use lockstep::cli::{execute, Cli};
use lockstep::error::{ConfigError, Error, HostError, RemoteError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("LOCKSTEP_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("lockstep=debug")
        } else {
            EnvFilter::new("lockstep=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, &cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingToken(var)) => {
                Some(format!("export {}=<token with repo secrets write access>", var))
            }
            Error::Host(HostError::NotElevated) => Some(if cfg!(windows) {
                "run from an Administrator PowerShell".to_string()
            } else {
                "re-run as root (e.g. with sudo)".to_string()
            }),
            Error::Remote(RemoteError::NotFound(_)) => Some("run: lockstep push".to_string()),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
