use thiserror::Error;

/// All errors that can occur in PocketVault.
#[derive(Debug, Error)]
pub enum PocketVaultError {
    // --- Master password errors ---
    #[error("Password too short — must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Wrong master password")]
    WrongPassword,

    #[error("Vault is already initialized — a master password has been set")]
    AlreadyInitialized,

    #[error("Vault is not initialized — set a master password first")]
    VaultNotInitialized,

    #[error("Vault is locked — unlock it before accessing data")]
    VaultLocked,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid master key record: {0}")]
    InvalidKeyRecord(String),

    // --- Input validation ---
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PocketVault results.
pub type Result<T> = std::result::Result<T, PocketVaultError>;
