//! Remote secret store synchronization.
//!
//! The store itself is abstracted behind [`RemoteStore`] so the
//! reconciliation logic can run against AWS or an in-memory fake.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `RemoteStore` trait
//! 2. Map the backend's "record does not exist" signal on `update` to
//!    `RemoteError::NotFound`, and nothing else
//! 3. Re-export from this module

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::domain::{RemoteSecretRecord, SecretSet};
use crate::error::RemoteError;

pub mod aws;
mod memory;

pub use aws::SecretsManager;
pub use memory::MemoryStore;

/// Version identifier a store reports for a write, if any.
pub type Version = Option<String>;

/// Remote secret store port.
///
/// Payloads are the JSON serialization of a [`SecretSet`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Replace the payload of an existing record.
    ///
    /// # Errors
    ///
    /// Must return `RemoteError::NotFound` when, and only when, the record
    /// does not exist.
    async fn update(&self, id: &str, payload: &str) -> Result<Version, RemoteError>;

    /// Create a new record.
    async fn create(&self, id: &str, description: &str, payload: &str)
        -> Result<Version, RemoteError>;

    /// Read the current payload of a record.
    async fn read(&self, id: &str) -> Result<String, RemoteError>;
}

/// Create-or-update reconciliation against a [`RemoteStore`].
pub struct RemoteStoreSync<S> {
    store: S,
    description: String,
}

impl<S: RemoteStore> RemoteStoreSync<S> {
    /// `description` is attached to records this sync creates.
    pub fn new(store: S, description: impl Into<String>) -> Self {
        Self {
            store,
            description: description.into(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the record `id` with `secrets`, creating it if absent.
    ///
    /// Tries `update` first; only `RemoteError::NotFound` falls through to
    /// `create`. The record is replaced wholesale, never merged.
    ///
    /// # Errors
    ///
    /// Any error other than not-found on update, and any error from create,
    /// is returned unchanged.
    pub async fn upsert(
        &self,
        id: &str,
        secrets: &SecretSet,
    ) -> Result<RemoteSecretRecord, RemoteError> {
        let payload = secrets.to_json()?;
        debug!(id, count = secrets.len(), "updating remote secret");

        let (version, created) = match self.store.update(id, &payload).await {
            Ok(version) => {
                info!(id, "updated existing secret");
                (version, false)
            }
            Err(RemoteError::NotFound(_)) => {
                debug!(id, "secret does not exist, creating");
                let version = self.store.create(id, &self.description, &payload).await?;
                info!(id, "created new secret");
                (version, true)
            }
            Err(e) => return Err(e),
        };

        Ok(RemoteSecretRecord::new(
            id.to_string(),
            version,
            created,
            secrets.clone(),
        ))
    }

    /// Read the committed secret set for `id`.
    ///
    /// # Errors
    ///
    /// Propagates store errors, and `RemoteError::Malformed` / `InvalidSet`
    /// if the payload is not a flat string map with non-empty keys.
    pub async fn fetch(&self, id: &str) -> Result<SecretSet, RemoteError> {
        debug!(id, "reading remote secret");
        let payload = self.store.read(id).await?;
        let secrets = SecretSet::from_json(&payload)?;
        debug!(id, count = secrets.len(), "remote secret read");
        Ok(secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn set(pairs: &[(&str, &str)]) -> SecretSet {
        SecretSet::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_updates_without_create() {
        let mut store = MockRemoteStore::new();
        store
            .expect_update()
            .with(eq("metal-env"), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(Some("v2".to_string())));
        store.expect_create().never();

        let sync = RemoteStoreSync::new(store, "desc");
        let record = sync.upsert("metal-env", &set(&[("A", "1")])).await.unwrap();

        assert!(!record.was_created());
        assert_eq!(record.version(), Some("v2"));
    }

    #[tokio::test]
    async fn test_upsert_creates_on_not_found() {
        let mut store = MockRemoteStore::new();
        store
            .expect_update()
            .times(1)
            .returning(|id, _| Err(RemoteError::NotFound(id.to_string())));
        store
            .expect_create()
            .with(
                eq("metal-env"),
                eq("Node-RED Production Environment Variables"),
                eq("{\n  \"A\": \"1\"\n}"),
            )
            .times(1)
            .returning(|_, _, _| Ok(Some("v1".to_string())));

        let sync = RemoteStoreSync::new(store, "Node-RED Production Environment Variables");
        let record = sync.upsert("metal-env", &set(&[("A", "1")])).await.unwrap();

        assert!(record.was_created());
        assert_eq!(record.id(), "metal-env");
    }

    #[tokio::test]
    async fn test_upsert_propagates_other_errors_without_create() {
        let mut store = MockRemoteStore::new();
        store
            .expect_update()
            .times(1)
            .returning(|_, _| Err(RemoteError::Api("AccessDeniedException".into())));
        store.expect_create().never();

        let sync = RemoteStoreSync::new(store, "desc");
        let err = sync.upsert("metal-env", &set(&[("A", "1")])).await.unwrap_err();

        assert!(matches!(err, RemoteError::Api(msg) if msg == "AccessDeniedException"));
    }

    #[tokio::test]
    async fn test_upsert_propagates_create_failure() {
        let mut store = MockRemoteStore::new();
        store
            .expect_update()
            .returning(|id, _| Err(RemoteError::NotFound(id.to_string())));
        store
            .expect_create()
            .returning(|_, _, _| Err(RemoteError::Api("LimitExceededException".into())));

        let sync = RemoteStoreSync::new(store, "desc");
        assert!(sync.upsert("metal-env", &set(&[("A", "1")])).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_payload() {
        let mut store = MockRemoteStore::new();
        store
            .expect_read()
            .returning(|_| Ok("not json".to_string()));

        let sync = RemoteStoreSync::new(store, "desc");
        let err = sync.fetch("metal-env").await.unwrap_err();

        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_round_trip_through_memory_store() {
        let sync = RemoteStoreSync::new(MemoryStore::new(), "desc");
        let secrets = set(&[("DB_SECRET", "abcd"), ("PORT", "8080"), ("EMPTY", "")]);

        sync.upsert("metal-env", &secrets).await.unwrap();
        assert_eq!(sync.fetch("metal-env").await.unwrap(), secrets);
    }

    #[tokio::test]
    async fn test_upsert_twice_is_idempotent() {
        let sync = RemoteStoreSync::new(MemoryStore::new(), "desc");
        let secrets = set(&[("A", "1"), ("B", "2")]);

        let first = sync.upsert("metal-env", &secrets).await.unwrap();
        let second = sync.upsert("metal-env", &secrets).await.unwrap();

        assert!(first.was_created());
        assert!(!second.was_created());
        assert_eq!(sync.store().len(), 1);
        assert_eq!(sync.fetch("metal-env").await.unwrap(), secrets);
    }

    #[tokio::test]
    async fn test_upsert_replaces_rather_than_merges() {
        let sync = RemoteStoreSync::new(MemoryStore::new(), "desc");
        sync.upsert("metal-env", &set(&[("OLD", "x"), ("A", "1")]))
            .await
            .unwrap();

        let replacement = set(&[("A", "2")]);
        sync.upsert("metal-env", &replacement).await.unwrap();

        let fetched = sync.fetch("metal-env").await.unwrap();
        assert_eq!(fetched, replacement);
        assert!(!fetched.contains_key("OLD"));
    }

    #[tokio::test]
    async fn test_fetch_missing_record_is_not_found() {
        let sync = RemoteStoreSync::new(MemoryStore::new(), "desc");
        let err = sync.fetch("metal-env").await.unwrap_err();

        assert!(matches!(err, RemoteError::NotFound(id) if id == "metal-env"));
    }
}
