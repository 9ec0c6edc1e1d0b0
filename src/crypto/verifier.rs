//! Master-password fingerprint creation and verification.
//!
//! The vault never stores the master password. What it stores is a
//! `KeyRecord`: the KDF salt plus a one-way fingerprint of the derived
//! session key (`SHA-256(session_key)`). Verifying a candidate password
//! re-derives the key with the stored salt and compares fingerprints in
//! constant time. A match yields the session key itself, so unlock runs
//! the (deliberately slow) KDF exactly once.
//!
//! There is no path from fingerprint back to password: losing the
//! password makes the encrypted entries permanently unrecoverable.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{PocketVaultError, Result};

use super::kdf::{self, KdfParams, SessionKey, SALT_LEN};

/// Minimum master password length.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Length of the SHA-256 fingerprint in bytes.
const VERIFIER_LEN: usize = 32;

/// The persisted master-key record: KDF salt + session-key fingerprint.
///
/// At most one exists per vault. Once written it is never updated —
/// there is no password-change operation, so the vault stays bound to
/// whichever password produced this record.
pub struct KeyRecord {
    salt: [u8; SALT_LEN],
    verifier: [u8; VERIFIER_LEN],
}

impl KeyRecord {
    /// Derive a fresh record from a candidate master password.
    ///
    /// Generates a random salt, derives the session key, and
    /// fingerprints it. Returns the record together with the session
    /// key so the caller can start using the vault immediately.
    pub fn create(candidate: &str, params: &KdfParams) -> Result<(Self, SessionKey)> {
        validate_candidate(candidate)?;

        let salt = kdf::generate_salt();
        let key = kdf::derive_session_key(candidate, &salt, params)?;
        let verifier = fingerprint(&key);

        Ok((Self { salt, verifier }, key))
    }

    /// Verify a candidate master password against this record.
    ///
    /// Re-derives the session key with the stored salt and compares
    /// fingerprints in constant time. On a match the derived key is
    /// returned; on a mismatch the key is dropped (zeroized) and
    /// `WrongPassword` is returned.
    pub fn check(&self, candidate: &str, params: &KdfParams) -> Result<SessionKey> {
        validate_candidate(candidate)?;

        let key = kdf::derive_session_key(candidate, &self.salt, params)?;
        let computed = fingerprint(&key);

        if computed.as_slice().ct_eq(self.verifier.as_slice()).into() {
            Ok(key)
        } else {
            Err(PocketVaultError::WrongPassword)
        }
    }

    /// Encode the record as a single base64 string: `base64(salt || verifier)`.
    ///
    /// This is the exact value stored under the `masterPassHash` key.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(SALT_LEN + VERIFIER_LEN);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.verifier);
        BASE64.encode(buf)
    }

    /// Decode a record previously produced by `encode`.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| PocketVaultError::InvalidKeyRecord(format!("bad base64: {e}")))?;

        if bytes.len() != SALT_LEN + VERIFIER_LEN {
            return Err(PocketVaultError::InvalidKeyRecord(format!(
                "expected {} bytes, got {}",
                SALT_LEN + VERIFIER_LEN,
                bytes.len()
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);
        let mut verifier = [0u8; VERIFIER_LEN];
        verifier.copy_from_slice(&bytes[SALT_LEN..]);

        Ok(Self { salt, verifier })
    }
}

/// Enforce the minimum master password length.
///
/// Counts characters, not bytes, so multi-byte input is not penalized.
fn validate_candidate(candidate: &str) -> Result<()> {
    if candidate.chars().count() < MIN_PASSWORD_LEN {
        return Err(PocketVaultError::WeakPassword(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// SHA-256 fingerprint of the derived session key.
fn fingerprint(key: &SessionKey) -> [u8; VERIFIER_LEN] {
    let digest = Sha256::digest(key.as_bytes());
    digest.into()
}
