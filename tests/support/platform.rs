//! In-memory CI platform for pipeline tests.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lockstep::core::ci::CiPlatform;
use lockstep::core::domain::{CiRecipientKey, EncryptedSecretEntry};
use lockstep::error::CiError;

/// Records every submitted entry and can reject chosen names.
pub struct RecordingPlatform {
    secret: SecretKey,
    key_id: String,
    rejected: BTreeSet<String>,
    key_fetches: AtomicUsize,
    attempts: Mutex<Vec<String>>,
    stored: Mutex<Vec<EncryptedSecretEntry>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self {
            secret: SecretKey::generate(&mut OsRng),
            key_id: "3380204578043523366".to_string(),
            rejected: BTreeSet::new(),
            key_fetches: AtomicUsize::new(0),
            attempts: Mutex::new(Vec::new()),
            stored: Mutex::new(Vec::new()),
        }
    }

    /// Reject submissions for `name` with a 422.
    pub fn rejecting(mut self, name: &str) -> Self {
        self.rejected.insert(name.to_string());
        self
    }

    pub fn key_fetches(&self) -> usize {
        self.key_fetches.load(Ordering::SeqCst)
    }

    /// Names submitted, in order, including rejected ones.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    /// Names accepted, in order.
    pub fn stored_names(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Open a stored secret with the repository's private key.
    pub fn open(&self, name: &str) -> Option<String> {
        let stored = self.stored.lock().unwrap();
        let entry = stored.iter().find(|e| e.name == name)?;
        assert_eq!(entry.key_id, self.key_id);

        let sealed = STANDARD.decode(&entry.encrypted_value).ok()?;
        let opened = self.secret.unseal(&sealed).ok()?;
        String::from_utf8(opened).ok()
    }
}

#[async_trait]
impl CiPlatform for RecordingPlatform {
    async fn get_repo_public_key(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> Result<CiRecipientKey, CiError> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(CiRecipientKey {
            key_id: self.key_id.clone(),
            key: STANDARD.encode(self.secret.public_key().as_bytes()),
        })
    }

    async fn create_or_update_repo_secret(
        &self,
        _owner: &str,
        _repo: &str,
        entry: &EncryptedSecretEntry,
    ) -> Result<(), CiError> {
        self.attempts.lock().unwrap().push(entry.name.clone());
        if self.rejected.contains(&entry.name) {
            return Err(CiError::Api {
                status: 422,
                body: format!("{{\"message\":\"Failed to add secret {}\"}}", entry.name),
            });
        }

        let mut stored = self.stored.lock().unwrap();
        stored.retain(|e| e.name != entry.name);
        stored.push(entry.clone());
        Ok(())
    }
}
