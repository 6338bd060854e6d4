//! Constants used throughout lockstep.
//!
//! Defaults mirror the deployment lockstep was first written for.

/// Configuration file name (.lockstep.toml).
pub const CONFIG_FILE: &str = ".lockstep.toml";

/// Default source file (.env).
pub const ENV_FILE: &str = ".env";

/// Identifier of the remote secret record.
pub const SECRET_ID: &str = "metal-env";

/// Description attached to the remote record when it is first created.
pub const SECRET_DESCRIPTION: &str = "Node-RED Production Environment Variables";

/// Region used when neither the config nor `AWS_REGION` names one.
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Replacement printed for sensitive values.
pub const MASK: &str = "********";

/// Key-name substrings that mark a value as sensitive.
pub const SENSITIVE_MARKERS: &[&str] = &["SECRET", "KEY"];

/// GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Default repository owner for published CI secrets.
pub const GITHUB_OWNER: &str = "hidenori-j";

/// Default repository for published CI secrets.
pub const GITHUB_REPO: &str = "metal-nginx";

/// Environment variable holding the CI access token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Variables the deploy workflow needs.
pub const REQUIRED_CI_VARS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "EC2_SSH_KEY",
    "EC2_HOST",
];

/// Machine-wide environment file on Unix hosts.
pub const UNIX_ENVIRONMENT_FILE: &str = "/etc/environment";
