//! Anonymous sealed-box encryption for CI secrets.
//!
//! Compatible with libsodium's `crypto_box_seal`: an ephemeral X25519 key
//! pair per message, XSalsa20-Poly1305, no sender authentication. Only the
//! holder of the repository's private key can open the result.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::PublicKey;

use crate::core::domain::{CiRecipientKey, EncryptedSecretEntry};
use crate::core::types::EncryptedValue;
use crate::error::CiError;

/// Length of an X25519 public key in bytes.
const PUBLIC_KEY_LEN: usize = 32;

/// Decode a base64 (standard alphabet) X25519 public key.
///
/// # Errors
///
/// Returns `CiError::InvalidKey` if the key is not base64 or not 32 bytes.
pub fn decode_public_key(encoded: &str) -> Result<PublicKey, CiError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CiError::InvalidKey(format!("invalid base64: {}", e)))?;

    let bytes: [u8; PUBLIC_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        CiError::InvalidKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LEN,
            bytes.len()
        ))
    })?;

    Ok(PublicKey::from(bytes))
}

/// Seal `plaintext` for `recipient` and base64-encode the ciphertext.
///
/// # Errors
///
/// Returns `CiError::InvalidKey` for a malformed recipient key and
/// `CiError::Encryption` if sealing fails.
pub fn seal(plaintext: &str, recipient: &CiRecipientKey) -> Result<EncryptedValue, CiError> {
    let public_key = decode_public_key(&recipient.key)?;
    let sealed = public_key
        .seal(&mut OsRng, plaintext.as_bytes())
        .map_err(|e| CiError::Encryption(e.to_string()))?;

    Ok(STANDARD.encode(sealed))
}

/// Seal one named secret into a publishable entry.
///
/// # Errors
///
/// Same as [`seal`].
pub fn seal_entry(
    name: &str,
    plaintext: &str,
    recipient: &CiRecipientKey,
) -> Result<EncryptedSecretEntry, CiError> {
    Ok(EncryptedSecretEntry {
        name: name.to_string(),
        encrypted_value: seal(plaintext, recipient)?,
        key_id: recipient.key_id.clone(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crypto_box::SecretKey;

    /// A fresh key pair, the public half encoded as the platform would send it.
    pub(crate) fn recipient() -> (SecretKey, CiRecipientKey) {
        let secret = SecretKey::generate(&mut OsRng);
        let key = CiRecipientKey {
            key_id: "568250167242549743".to_string(),
            key: STANDARD.encode(secret.public_key().as_bytes()),
        };
        (secret, key)
    }

    #[test]
    fn test_sealed_value_opens_with_private_key() {
        let (secret, key) = recipient();
        let sealed = seal("ec2-54-1-2-3.compute.amazonaws.com", &key).unwrap();

        let ciphertext = STANDARD.decode(sealed).unwrap();
        let opened = secret.unseal(&ciphertext).unwrap();
        assert_eq!(opened, b"ec2-54-1-2-3.compute.amazonaws.com");
    }

    #[test]
    fn test_sealing_is_randomized() {
        let (_, key) = recipient();
        assert_ne!(seal("same", &key).unwrap(), seal("same", &key).unwrap());
    }

    #[test]
    fn test_ciphertext_has_sealed_box_overhead() {
        // ephemeral public key (32) + Poly1305 tag (16)
        let (_, key) = recipient();
        let sealed = STANDARD.decode(seal("abc", &key).unwrap()).unwrap();
        assert_eq!(sealed.len(), 3 + 48);
    }

    #[test]
    fn test_entry_carries_key_id() {
        let (_, key) = recipient();
        let entry = seal_entry("EC2_HOST", "host", &key).unwrap();

        assert_eq!(entry.name, "EC2_HOST");
        assert_eq!(entry.key_id, "568250167242549743");
    }

    #[test]
    fn test_rejects_non_base64_key() {
        let err = decode_public_key("not base64!").unwrap_err();
        assert!(matches!(err, CiError::InvalidKey(_)));
    }

    #[test]
    fn test_rejects_wrong_length_key() {
        let err = decode_public_key(&STANDARD.encode([1u8; 16])).unwrap_err();
        assert!(matches!(err, CiError::InvalidKey(msg) if msg.contains("got 16")));
    }
}
