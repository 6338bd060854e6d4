//! Lockstep - keep one secret set in sync across every place it is consumed.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write a default .lockstep.toml
//! │   ├── push          # .env → remote store, then read back
//! │   ├── show          # Print the remote record, masked
//! │   ├── local         # Remote store → host environment
//! │   ├── publish       # Remote store → CI encrypted secrets
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .lockstep.toml management
//!     ├── domain/       # SecretSet, records, outcomes, masked report
//!     ├── env           # .env loading
//!     ├── remote/       # RemoteStore trait, upsert/fetch, AWS Secrets Manager
//!     ├── host/         # HostEnvironment trait, privilege-gated applier
//!     ├── ci/           # CiPlatform trait, sealed boxes, GitHub Actions
//!     └── pipeline      # push / apply_local / publish_ci flows
//! ```
//!
//! The remote record is the single source of truth. The host environment
//! and CI secrets are projections of it and are always built from a fresh
//! read of the committed record.

pub mod cli;
pub mod core;
pub mod error;
