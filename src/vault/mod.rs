//! Vault module — the encrypted personal data vault.
//!
//! This module provides:
//! - Item and document types (`document`)
//! - Typed reads/writes of the two storage keys (`store`)
//! - The lock/unlock state machine and mutation API (`session`)

pub mod document;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use document::{
    EncryptedPassword, PasswordEntry, SnippetItem, TodoItem, VaultDocument, WorkingSet,
};
pub use session::VaultSession;
pub use store::VaultStore;
