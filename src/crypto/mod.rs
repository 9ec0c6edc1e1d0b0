//! Cryptographic primitives for PocketVault.
//!
//! This module provides:
//! - Argon2id master-password key derivation (`kdf`)
//! - Master-password fingerprint creation and verification (`verifier`)
//! - AES-256-GCM encryption of individual string values (`codec`)

pub mod codec;
pub mod kdf;
pub mod verifier;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, SessionKey, KeyRecord, ...};
pub use codec::{decrypt, encrypt};
pub use kdf::{derive_session_key, generate_salt, KdfParams, SessionKey};
pub use verifier::KeyRecord;
