//! Error types for lockstep.
//!
//! Each destination gets its own error enum so callers can tell a fatal,
//! stage-level failure apart from a recoverable per-item one.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Ci(#[from] CiError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("aborted: {0}")]
    Aborted(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and credential errors. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("{0} is not set")]
    MissingToken(&'static str),
}

/// Secret set invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("secret key must not be empty")]
    EmptyKey,
}

/// Errors reading the flat `KEY=VALUE` source file.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    Syntax {
        path: String,
        line: usize,
        reason: &'static str,
    },

    #[error("{path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: ValidationError,
    },
}

/// Remote secret store errors.
///
/// `NotFound` is the only variant `upsert` recovers from.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("remote store request failed: {0}")]
    Api(String),

    #[error("secret {0} has no string payload")]
    EmptyPayload(String),

    #[error("malformed secret payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid secret set: {0}")]
    InvalidSet(#[from] ValidationError),
}

/// Host environment errors.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("administrator privileges are required to set machine-wide environment variables")]
    NotElevated,

    #[error("failed to set {key}: {reason}")]
    SetFailed { key: String, reason: String },

    #[error("failed to update {path}: {source}")]
    EnvironmentFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// CI platform errors.
#[derive(Error, Debug)]
pub enum CiError {
    #[error("CI request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("CI transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid repository public key: {0}")]
    InvalidKey(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("invalid secret name: {0:?}")]
    InvalidName(String),

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl CiError {
    /// HTTP status and response body, when the platform answered.
    pub fn response(&self) -> Option<(u16, &str)> {
        match self {
            CiError::Api { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
