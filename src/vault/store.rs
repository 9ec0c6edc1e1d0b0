//! Typed access to the two durable storage entries.
//!
//! The vault occupies exactly two keys in the underlying key-value
//! store:
//!
//! - `masterPassHash` — the encoded master-key record (salt + one-way
//!   fingerprint of the derived session key).
//! - `vaultData` — the JSON `VaultDocument`.
//!
//! Reads are lenient: an absent or malformed entry reads as "nothing
//! there" so callers treat it as an empty vault. Writes propagate
//! storage failures unmasked — persistence failure must not be hidden.

use crate::crypto::KeyRecord;
use crate::errors::{PocketVaultError, Result};
use crate::storage::KeyValueStore;

use super::document::VaultDocument;

/// Storage key holding the master-key record.
pub const MASTER_KEY_RECORD: &str = "masterPassHash";

/// Storage key holding the vault document JSON.
pub const VAULT_DATA: &str = "vaultData";

/// Binds the two storage keys to typed read/write operations over any
/// `KeyValueStore`.
pub struct VaultStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> VaultStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True iff a master-key record exists. Read failures count as
    /// absent — an unreadable store is indistinguishable from a fresh one.
    pub fn has_key_record(&self) -> bool {
        matches!(self.store.get(MASTER_KEY_RECORD), Ok(Some(_)))
    }

    /// Read and decode the master-key record, if present.
    ///
    /// A present-but-undecodable record is an error (`InvalidKeyRecord`):
    /// silently treating it as absent would let a re-initialize clobber
    /// a vault whose entries might still be recoverable.
    pub fn read_key_record(&self) -> Result<Option<KeyRecord>> {
        match self.store.get(MASTER_KEY_RECORD)? {
            Some(encoded) => Ok(Some(KeyRecord::decode(&encoded)?)),
            None => Ok(None),
        }
    }

    /// Persist the master-key record. Storage failures propagate.
    pub fn write_key_record(&mut self, record: &KeyRecord) -> Result<()> {
        self.store.set(MASTER_KEY_RECORD, &record.encode())
    }

    /// Read the vault document. Absent or malformed JSON reads as
    /// `None`; the caller treats that as an empty vault.
    pub fn read_document(&self) -> Option<VaultDocument> {
        let raw = self.store.get(VAULT_DATA).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Serialize and persist the vault document. Last write wins;
    /// storage failures propagate.
    pub fn write_document(&mut self, doc: &VaultDocument) -> Result<()> {
        let json = serde_json::to_string(doc)
            .map_err(|e| PocketVaultError::SerializationError(e.to_string()))?;
        self.store.set(VAULT_DATA, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KdfParams;
    use crate::storage::MemoryStore;
    use crate::vault::document::TodoItem;

    fn fast_params() -> KdfParams {
        KdfParams {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn key_record_roundtrip() {
        let mut store = VaultStore::new(MemoryStore::new());
        assert!(!store.has_key_record());
        assert!(store.read_key_record().unwrap().is_none());

        let (record, _key) = KeyRecord::create("abcd", &fast_params()).unwrap();
        store.write_key_record(&record).unwrap();

        assert!(store.has_key_record());
        let loaded = store.read_key_record().unwrap().unwrap();
        assert_eq!(loaded.encode(), record.encode());
    }

    #[test]
    fn corrupt_key_record_is_an_error_not_absent() {
        let mut inner = MemoryStore::new();
        inner.set(MASTER_KEY_RECORD, "!!not-base64!!").unwrap();
        let store = VaultStore::new(inner);

        assert!(store.has_key_record());
        assert!(store.read_key_record().is_err());
    }

    #[test]
    fn document_roundtrip() {
        let mut store = VaultStore::new(MemoryStore::new());
        assert!(store.read_document().is_none());

        let mut doc = VaultDocument::default();
        doc.todos.push(TodoItem::new("water plants"));
        store.write_document(&doc).unwrap();

        let loaded = store.read_document().unwrap();
        assert_eq!(loaded.todos.len(), 1);
        assert_eq!(loaded.todos[0].text, "water plants");
    }

    #[test]
    fn malformed_document_reads_as_none() {
        let mut inner = MemoryStore::new();
        inner.set(VAULT_DATA, "{broken json").unwrap();
        let store = VaultStore::new(inner);
        assert!(store.read_document().is_none());
    }
}
