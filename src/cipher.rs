//! Passphrase-based symmetric encryption for payload bodies.
//!
//! - HKDF-SHA256 derives a 256-bit key from the passphrase
//! - ChaCha20-Poly1305 provides authenticated encryption
//! - The textual ciphertext is base64 over `nonce (12 bytes) || ciphertext`
//!
//! The base64 alphabet contains neither `|` nor `:`, so a ciphertext body can
//! never collide with the frame's field separator or be mistaken for a batch
//! label. Decryption with the wrong passphrase fails the AEAD tag check and
//! is reported as an error - it never yields silently wrong plaintext.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use sha2::Sha256;
use thiserror::Error;

/// HKDF info string for passphrase-based key derivation.
const HKDF_INFO: &[u8] = b"QRSEAL-V1-SYMMETRIC";

/// Salt for HKDF (fixed, so the same passphrase derives the same key).
const HKDF_SALT: &[u8] = b"QRSEAL-V1-SALT";

/// Nonce size for ChaCha20Poly1305.
const NONCE_SIZE: usize = 12;

/// Errors that can occur while encrypting or decrypting a body.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid ciphertext encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid ciphertext: too short")]
    CiphertextTooShort,

    #[error("Decrypted bytes are not valid UTF-8")]
    NotText,

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

/// Derives a 256-bit symmetric key from a passphrase.
fn derive_key(passphrase: &str) -> Result<[u8; 32], CipherError> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), passphrase.as_bytes());
    let mut key = [0u8; 32];
    hk.expand(HKDF_INFO, &mut key)
        .map_err(|_| CipherError::KeyDerivationFailed)?;
    Ok(key)
}

/// Encrypts `plaintext` under `passphrase` into a self-contained string.
///
/// The output is base64 over `nonce || ciphertext` (the ciphertext includes
/// the Poly1305 tag), so everything needed to decrypt travels in one blob.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String, CipherError> {
    let key = derive_key(passphrase)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::RngCore::fill_bytes(&mut OsRng, &mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(&blob))
}

/// Decrypts a string produced by [`encrypt`] with the same passphrase.
pub fn decrypt(encoded: &str, passphrase: &str) -> Result<String, CipherError> {
    let blob = BASE64
        .decode(encoded.trim())
        .map_err(|e| CipherError::InvalidEncoding(e.to_string()))?;

    // Minimum: 12 (nonce) + 16 (auth tag) = 28 bytes
    if blob.len() < 28 {
        return Err(CipherError::CiphertextTooShort);
    }

    let nonce_bytes = &blob[..NONCE_SIZE];
    let ciphertext = &blob[NONCE_SIZE..];

    let key = derive_key(passphrase)?;

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

    String::from_utf8(plaintext).map_err(|_| CipherError::NotText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FIELD_SEPARATOR, LABEL_SEPARATOR};

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = "Hello, Qrseal!";
        let passphrase = "my_secret_passphrase";

        let encrypted = encrypt(plaintext, passphrase).unwrap();
        let decrypted = decrypt(&encrypted, passphrase).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let encrypted = encrypt("Secret data", "correct").unwrap();
        let result = decrypt(&encrypted, "wrong");

        assert!(matches!(result, Err(CipherError::DecryptionFailed(_))));
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let encrypted = encrypt("", "test").unwrap();
        let decrypted = decrypt(&encrypted, "test").unwrap();

        assert_eq!(decrypted, "");
    }

    #[test]
    fn test_plaintext_body_is_not_valid_ciphertext() {
        // Decoding a never-encrypted body must fail loudly, not produce junk.
        let result = decrypt("crate 7, dock B", "any-key");
        assert!(result.is_err());
    }

    #[test]
    fn test_ciphertext_too_short() {
        let short = BASE64.encode([0u8; 10]);
        let result = decrypt(&short, "test");

        assert!(matches!(result, Err(CipherError::CiphertextTooShort)));
    }

    #[test]
    fn test_ciphertext_is_frame_safe() {
        // The framing layer depends on ciphertext never containing the
        // field separator or a label separator.
        let encrypted = encrypt("a|b: c|d", "key").unwrap();
        assert!(!encrypted.contains(FIELD_SEPARATOR));
        assert!(!encrypted.contains(LABEL_SEPARATOR));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let a = encrypt("same text", "same key").unwrap();
        let b = encrypt("same text", "same key").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_deterministic_key_derivation() {
        let key1 = derive_key("test_passphrase").unwrap();
        let key2 = derive_key("test_passphrase").unwrap();

        assert_eq!(key1, key2);
    }
}
