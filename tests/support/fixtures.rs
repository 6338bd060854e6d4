//! Test fixtures and constants.

/// Sample .env with a sensitive key and a plain one.
pub const SAMPLE_ENV: &str = "DB_SECRET=abcd\nPORT=8080\n";

/// The deploy variables plus two the CI never needs.
pub const DEPLOY_ENV: &[(&str, &str)] = &[
    ("A", "unrelated"),
    ("B", "also unrelated"),
    ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
    ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG"),
    ("EC2_HOST", "ec2-54-1-2-3.compute.amazonaws.com"),
];

/// The default CI allow-list.
pub const REQUIRED: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "EC2_SSH_KEY",
    "EC2_HOST",
];
