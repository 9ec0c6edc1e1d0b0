//! AES-256-GCM authenticated encryption of individual string values.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext, so encrypting the same plaintext
//! twice yields different output. The whole blob is base64-encoded so
//! it can live inside the JSON vault document as an ordinary string.
//!
//! Layout of the encoded blob (before base64):
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! `decrypt` is total: malformed base64, truncation, a wrong key, or a
//! corrupted blob all return `None` rather than an error. The auth tag
//! makes wrong-key decrypts fail cleanly instead of yielding garbage.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{PocketVaultError, Result};

use super::kdf::SessionKey;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under the session key.
///
/// Returns `base64(nonce || ciphertext)`.
pub fn encrypt(key: &SessionKey, plaintext: &str) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PocketVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| PocketVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(blob))
}

/// Decrypt a blob that was produced by `encrypt` under the same key.
///
/// Returns `None` on any failure. The session treats `None` as "drop
/// this entry", so corruption and key mismatches are recoverable by
/// design rather than fatal.
pub fn decrypt(key: &SessionKey, encoded: &str) -> Option<String> {
    let blob = BASE64.decode(encoded).ok()?;

    // Make sure we have at least a nonce worth of bytes.
    if blob.len() < NONCE_LEN {
        return None;
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).ok()?;

    // Decrypt and verify the auth tag.
    let plaintext = cipher.decrypt(nonce, ciphertext).ok()?;

    String::from_utf8(plaintext).ok()
}
