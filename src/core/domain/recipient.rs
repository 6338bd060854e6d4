//! CI recipient key and encrypted entry types.

use crate::core::types::{EncryptedValue, SecretKey};

/// A repository's public key for sealing secrets.
///
/// `key` is the base64-encoded X25519 public key exactly as the platform
/// returns it; `key_id` must accompany every secret sealed with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiRecipientKey {
    pub key_id: String,
    pub key: String,
}

/// One sealed secret, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecretEntry {
    pub name: SecretKey,
    pub encrypted_value: EncryptedValue,
    pub key_id: String,
}

impl std::fmt::Display for EncryptedSecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
