//! End-to-end flows over the sync components.
//!
//! The remote record is the hub: `push` writes it from the source file,
//! and the local and CI flows always start from a fresh read of it rather
//! than from any in-memory copy.

use std::path::Path;
use tracing::{info, warn};

use crate::core::ci::{CiPlatform, CiSecretPublisher};
use crate::core::domain::{ApplySummary, PublishSummary, RemoteSecretRecord, SecretSet};
use crate::core::env;
use crate::core::host::{ElevatedApplier, HostEnvironment};
use crate::core::remote::{RemoteStore, RemoteStoreSync};
use crate::core::types::SecretKey;
use crate::error::Result;

/// Result of pushing a source file to the remote store.
#[derive(Debug)]
pub struct PushResult {
    /// The record as written
    pub record: RemoteSecretRecord,
    /// The set read back after the write
    pub committed: SecretSet,
}

impl PushResult {
    /// Whether the read-back matches what was written
    pub fn verified(&self) -> bool {
        self.record.secrets().digest() == self.committed.digest()
    }
}

/// Load `source`, upsert it as record `id`, and read it back.
///
/// # Errors
///
/// Any load, write, or read failure aborts the push.
pub async fn push<S: RemoteStore>(
    remote: &RemoteStoreSync<S>,
    id: &str,
    source: &Path,
) -> Result<PushResult> {
    let secrets = env::load(source)?;
    push_set(remote, id, &secrets).await
}

/// Upsert an already-loaded set as record `id` and read it back.
///
/// # Errors
///
/// Any write or read failure aborts the push.
pub async fn push_set<S: RemoteStore>(
    remote: &RemoteStoreSync<S>,
    id: &str,
    secrets: &SecretSet,
) -> Result<PushResult> {
    let record = remote.upsert(id, secrets).await?;
    let committed = remote.fetch(id).await?;

    let result = PushResult { record, committed };
    if result.verified() {
        info!(id, digest = %result.committed.digest(), "read-back verified");
    } else {
        warn!(id, "read-back differs from the written secret set");
    }
    Ok(result)
}

/// Read record `id` and bind every entry on the host.
///
/// Taking an [`ElevatedApplier`] means the privilege gate has already
/// passed before the remote is contacted.
///
/// # Errors
///
/// Returns the remote read failure; per-key failures are in the summary.
pub async fn apply_local<S: RemoteStore, H: HostEnvironment>(
    remote: &RemoteStoreSync<S>,
    id: &str,
    applier: &ElevatedApplier<'_, H>,
) -> Result<ApplySummary> {
    let secrets = remote.fetch(id).await?;
    Ok(applier.apply_all(&secrets))
}

/// Read record `id` and publish the `required` subset to CI.
///
/// # Errors
///
/// Returns the remote read or key fetch failure; per-variable failures are
/// in the summary.
pub async fn publish_ci<S: RemoteStore, P: CiPlatform>(
    remote: &RemoteStoreSync<S>,
    id: &str,
    publisher: &CiSecretPublisher<P>,
    required: &[SecretKey],
) -> Result<PublishSummary> {
    let secrets = remote.fetch(id).await?;
    Ok(publisher.publish_all(&secrets, required).await?)
}
