//! In-memory remote store.
//!
//! Behaves like Secrets Manager for the three calls lockstep makes:
//! update fails with not-found on a missing record, create fails on an
//! existing one, and every write bumps a version counter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{RemoteStore, Version};
use crate::error::RemoteError;

#[derive(Debug, Clone)]
struct Record {
    description: String,
    payload: String,
    version: u64,
}

/// Remote store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Raw payload of a record
    pub fn payload(&self, id: &str) -> Option<String> {
        self.records().get(id).map(|r| r.payload.clone())
    }

    /// Description a record was created with
    pub fn description(&self, id: &str) -> Option<String> {
        self.records().get(id).map(|r| r.description.clone())
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, Record>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn update(&self, id: &str, payload: &str) -> Result<Version, RemoteError> {
        let mut records = self.records();
        let record = records
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        record.payload = payload.to_string();
        record.version += 1;
        Ok(Some(format!("v{}", record.version)))
    }

    async fn create(
        &self,
        id: &str,
        description: &str,
        payload: &str,
    ) -> Result<Version, RemoteError> {
        let mut records = self.records();
        if records.contains_key(id) {
            return Err(RemoteError::Api(format!("secret {} already exists", id)));
        }
        records.insert(
            id.to_string(),
            Record {
                description: description.to_string(),
                payload: payload.to_string(),
                version: 1,
            },
        );
        Ok(Some("v1".to_string()))
    }

    async fn read(&self, id: &str) -> Result<String, RemoteError> {
        self.payload(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }
}
