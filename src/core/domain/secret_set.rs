//! SecretSet type.
//!
//! The flat name → value mapping every destination is derived from.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use zeroize::Zeroize;

use crate::core::types::{SecretKey, SecretValue};
use crate::error::{RemoteError, ValidationError};

/// A set of secrets keyed by unique, non-empty names.
///
/// Values may be empty strings. Entries are kept sorted so serialization
/// and digests are deterministic. Values are zeroized on drop.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SecretSet {
    entries: BTreeMap<SecretKey, SecretValue>,
}

impl SecretSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from key/value pairs. Later duplicates replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyKey` if any key is empty.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SecretKey>,
        V: Into<SecretValue>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert(key, value)?;
        }
        Ok(set)
    }

    /// Insert a secret, returning whether an existing value was replaced.
    ///
    /// A replaced value is zeroized before it is released.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyKey` if `key` is empty.
    pub fn insert(
        &mut self,
        key: impl Into<SecretKey>,
        value: impl Into<SecretValue>,
    ) -> Result<bool, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::EmptyKey);
        }
        match self.entries.insert(key, value.into()) {
            Some(mut previous) => {
                previous.zeroize();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Key names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a pretty-printed JSON object of string → string.
    pub fn to_json(&self) -> Result<String, RemoteError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Parse a JSON object of string → string.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Malformed` for anything other than a flat object
    /// of strings, and `RemoteError::InvalidSet` if a key is empty.
    pub fn from_json(payload: &str) -> Result<Self, RemoteError> {
        let entries: BTreeMap<SecretKey, SecretValue> = serde_json::from_str(payload)?;
        Ok(Self::try_from_pairs(entries)?)
    }

    /// Hex SHA-256 over the sorted entries.
    ///
    /// Two sets have the same digest exactly when they hold the same entries.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, value) in &self.entries {
            hasher.update((key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

// Values never reach debug output.
impl std::fmt::Debug for SecretSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl Drop for SecretSet {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

impl<'a> IntoIterator for &'a SecretSet {
    type Item = (&'a SecretKey, &'a SecretValue);
    type IntoIter = std::collections::btree_map::Iter<'a, SecretKey, SecretValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
