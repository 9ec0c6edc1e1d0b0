//! Password-based key derivation using Argon2id.
//!
//! The master password is never stored or used directly as key material.
//! Unlocking derives a 32-byte session key from the password and the
//! per-vault salt; everything downstream (fingerprint verification and
//! value encryption) works from that key.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{PocketVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.pocketvault.toml`.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive a 32-byte session key from a master password and salt.
///
/// The same password + salt + params always produce the same key.
/// Enforces minimum Argon2 parameters to prevent dangerously weak
/// KDF settings.
pub fn derive_session_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<SessionKey> {
    if params.memory_kib < MIN_MEMORY_KIB {
        return Err(PocketVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            params.memory_kib
        )));
    }
    if params.iterations < 1 {
        return Err(PocketVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if params.parallelism < 1 {
        return Err(PocketVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PocketVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| {
            PocketVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
        })?;

    let session_key = SessionKey::new(key);
    key.zeroize();
    Ok(session_key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// A wrapper around the 32-byte session key that automatically zeroes
/// its memory when dropped.
///
/// The session key exists only between unlock and lock/teardown; holding
/// it behind this wrapper keeps the raw bytes from lingering afterwards.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SessionKey {
    bytes: [u8; KEY_LEN],
}

impl SessionKey {
    /// Create a new `SessionKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the codec or digest).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
