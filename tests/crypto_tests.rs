//! Integration tests for the PocketVault crypto module.

use pocketvault::crypto::{decrypt, derive_session_key, encrypt, generate_salt};
use pocketvault::crypto::{KdfParams, KeyRecord, SessionKey};
use pocketvault::errors::PocketVaultError;

/// Fast Argon2 params so the test suite stays quick.
fn fast_params() -> KdfParams {
    KdfParams {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Codec round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = SessionKey::new([0xABu8; 32]);
    let plaintext = "s3cr3t-value";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // The blob embeds a nonce and auth tag, so it is longer than the input.
    assert!(ciphertext.len() > plaintext.len());
    assert_ne!(ciphertext, plaintext);

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = SessionKey::new([0xCDu8; 32]);
    let plaintext = "same input";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn roundtrip_preserves_unicode_and_whitespace() {
    let key = SessionKey::new([0x42u8; 32]);
    let plaintext = "  pässwörd → 密码\n";

    let ciphertext = encrypt(&key, plaintext).unwrap();
    assert_eq!(decrypt(&key, &ciphertext).as_deref(), Some(plaintext));
}

// ---------------------------------------------------------------------------
// Wrong-key isolation
// ---------------------------------------------------------------------------

#[test]
fn decrypt_with_wrong_key_returns_none() {
    let key = SessionKey::new([0x11u8; 32]);
    let wrong_key = SessionKey::new([0x22u8; 32]);

    let ciphertext = encrypt(&key, "top secret").expect("encrypt");

    // The auth tag fails verification — no crash, no garbage output.
    assert_eq!(decrypt(&wrong_key, &ciphertext), None);
}

#[test]
fn decrypt_malformed_input_returns_none() {
    let key = SessionKey::new([0xAAu8; 32]);

    // Not base64 at all.
    assert_eq!(decrypt(&key, "!!!not base64!!!"), None);
    // Valid base64 but shorter than a nonce.
    assert_eq!(decrypt(&key, "aGk="), None);
    // Empty string.
    assert_eq!(decrypt(&key, ""), None);
}

#[test]
fn decrypt_corrupted_ciphertext_returns_none() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let key = SessionKey::new([0xBBu8; 32]);
    let ciphertext = encrypt(&key, "value").expect("encrypt");

    // Flip a byte past the nonce and re-encode.
    let mut blob = BASE64.decode(&ciphertext).unwrap();
    blob[14] ^= 0xFF;
    let tampered = BASE64.encode(blob);

    assert_eq!(decrypt(&key, &tampered), None);
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_session_key_same_inputs_same_output() {
    let salt = generate_salt();

    let key1 = derive_session_key("my-passphrase", &salt, &fast_params()).expect("derive 1");
    let key2 = derive_session_key("my-passphrase", &salt, &fast_params()).expect("derive 2");

    assert_eq!(
        key1.as_bytes(),
        key2.as_bytes(),
        "same password + salt must produce the same key"
    );
}

#[test]
fn derive_session_key_different_salts_different_keys() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_session_key("same-password", &salt1, &fast_params()).expect("derive 1");
    let key2 = derive_session_key("same-password", &salt2, &fast_params()).expect("derive 2");

    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn derive_session_key_different_passwords_different_keys() {
    let salt = generate_salt();

    let key1 = derive_session_key("password-one", &salt, &fast_params()).expect("derive 1");
    let key2 = derive_session_key("password-two", &salt, &fast_params()).expect("derive 2");

    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn derive_session_key_rejects_weak_kdf_params() {
    let salt = generate_salt();
    let weak = KdfParams {
        memory_kib: 16, // far below the floor
        iterations: 1,
        parallelism: 1,
    };

    assert!(derive_session_key("password", &salt, &weak).is_err());
}

// ---------------------------------------------------------------------------
// Master-password fingerprint
// ---------------------------------------------------------------------------

#[test]
fn fingerprint_verifies_exact_password_only() {
    let (record, _key) = KeyRecord::create("abcd", &fast_params()).expect("create");

    assert!(record.check("abcd", &fast_params()).is_ok());

    // Case-sensitive.
    assert!(matches!(
        record.check("Abcd", &fast_params()),
        Err(PocketVaultError::WrongPassword)
    ));
    // Whitespace-sensitive.
    assert!(matches!(
        record.check("abcd ", &fast_params()),
        Err(PocketVaultError::WrongPassword)
    ));
}

#[test]
fn check_yields_same_session_key_as_create() {
    let (record, created_key) = KeyRecord::create("hunter42", &fast_params()).unwrap();
    let checked_key = record.check("hunter42", &fast_params()).unwrap();
    assert_eq!(created_key.as_bytes(), checked_key.as_bytes());
}

#[test]
fn short_passwords_are_rejected() {
    assert!(matches!(
        KeyRecord::create("abc", &fast_params()),
        Err(PocketVaultError::WeakPassword(_))
    ));

    let (record, _key) = KeyRecord::create("abcd", &fast_params()).unwrap();
    assert!(matches!(
        record.check("abc", &fast_params()),
        Err(PocketVaultError::WeakPassword(_))
    ));
}

#[test]
fn key_record_encode_decode_roundtrip() {
    let (record, _key) = KeyRecord::create("round-trip", &fast_params()).unwrap();

    let encoded = record.encode();
    let decoded = KeyRecord::decode(&encoded).expect("decode");

    // The decoded record still verifies the original password.
    assert!(decoded.check("round-trip", &fast_params()).is_ok());
    assert!(decoded.check("different!", &fast_params()).is_err());
}

#[test]
fn key_record_decode_rejects_garbage() {
    assert!(KeyRecord::decode("not base64 at all!!!").is_err());
    // Valid base64 of the wrong length.
    assert!(KeyRecord::decode("aGVsbG8=").is_err());
}
