//! Core library components.
//!
//! The synchronization logic: loading a secret set, reconciling it with the
//! remote store, and projecting it onto the host and CI destinations.

pub mod ci;
pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod host;
pub mod pipeline;
pub mod remote;
pub mod types;
