//! Type aliases for domain concepts.

/// A secret key name (e.g., DATABASE_URL, API_KEY).
pub type SecretKey = String;

/// A plaintext secret value.
pub type SecretValue = String;

/// Identifier of a record in the remote secret store (e.g., `metal-env`).
pub type RecordId = String;

/// Base64-encoded sealed-box ciphertext.
pub type EncryptedValue = String;
