//! RemoteSecretRecord type.

use super::SecretSet;
use crate::core::types::RecordId;

/// A secret set as committed to the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSecretRecord {
    id: RecordId,
    version: Option<String>,
    created: bool,
    secrets: SecretSet,
}

impl RemoteSecretRecord {
    /// Create a record from a completed write
    pub fn new(id: RecordId, version: Option<String>, created: bool, secrets: SecretSet) -> Self {
        Self {
            id,
            version,
            created,
            secrets,
        }
    }

    /// Record identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version identifier assigned by the store, if it reports one
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether the write created the record rather than replacing it
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// The secret set that was written
    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }
}

impl std::fmt::Display for RemoteSecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.id, version),
            None => write!(f, "{}", self.id),
        }
    }
}
