//! Item types, the persisted vault document, and the in-memory working set.
//!
//! The persisted JSON shapes are fixed:
//!
//! ```json
//! {"todos":[{"text":"...","completed":false}],
//!  "snippets":[{"title":"...","code":"..."}],
//!  "passwords":[{"site":"...","value":"<ciphertext>"}]}
//! ```
//!
//! Items are identified by their natural key (`text`, `title`, `site`),
//! which is ambiguous under duplicates. Each in-memory item therefore
//! also carries a generated `id` that is stable for the lifetime of a
//! session. Ids are never serialized — a fresh one is assigned whenever
//! an item is deserialized — so the wire shape stays exactly as above.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Generate a random 16-hex-character entry id.
pub fn new_entry_id() -> String {
    let mut bytes = [0u8; 8];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A to-do item. Plaintext at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    /// Session-stable generated identifier (not persisted).
    #[serde(skip_serializing, default = "new_entry_id")]
    pub id: String,

    /// The task text. Natural key for toggle/remove.
    pub text: String,

    /// Whether the task has been completed.
    pub completed: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_entry_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// A code snippet. Plaintext at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetItem {
    /// Session-stable generated identifier (not persisted).
    #[serde(skip_serializing, default = "new_entry_id")]
    pub id: String,

    /// Snippet title. Natural key for remove.
    pub title: String,

    /// The snippet body.
    pub code: String,
}

impl SnippetItem {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: new_entry_id(),
            title: title.into(),
            code: code.into(),
        }
    }
}

/// A password credential **at rest**: `value` is codec ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedPassword {
    /// Site or service name. Natural key for remove.
    pub site: String,

    /// Base64 ciphertext produced by `crypto::codec::encrypt`.
    pub value: String,
}

/// A password credential **in memory**: `value` is plaintext.
///
/// Exists only inside an unlocked session's working set; it is never
/// serialized. The save projection encrypts `value` back into an
/// `EncryptedPassword` before anything touches storage.
#[derive(Debug, Clone)]
pub struct PasswordEntry {
    /// Session-stable generated identifier.
    pub id: String,

    /// Site or service name.
    pub site: String,

    /// The plaintext password value.
    pub value: String,
}

impl PasswordEntry {
    pub fn new(site: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: new_entry_id(),
            site: site.into(),
            value: value.into(),
        }
    }
}

/// The persisted aggregate: everything the vault stores, as one JSON
/// document. Passwords appear only in encrypted form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultDocument {
    #[serde(default)]
    pub todos: Vec<TodoItem>,

    #[serde(default)]
    pub snippets: Vec<SnippetItem>,

    #[serde(default)]
    pub passwords: Vec<EncryptedPassword>,
}

/// The in-memory decrypted mirror of the vault during an unlocked
/// session. Owned exclusively by the session; never persisted itself.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    pub todos: Vec<TodoItem>,
    pub snippets: Vec<SnippetItem>,
    pub passwords: Vec<PasswordEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique_and_hex() {
        let a = new_entry_id();
        let b = new_entry_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn todo_serializes_without_id() {
        let todo = TodoItem::new("buy milk");
        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(json, r#"{"text":"buy milk","completed":false}"#);
    }

    #[test]
    fn snippet_serializes_without_id() {
        let snippet = SnippetItem::new("greet", "println!(\"hi\");");
        let json = serde_json::to_value(&snippet).unwrap();
        assert_eq!(json["title"], "greet");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn deserialized_items_get_fresh_ids() {
        let doc: VaultDocument = serde_json::from_str(
            r#"{"todos":[{"text":"a","completed":true}],"snippets":[],"passwords":[]}"#,
        )
        .unwrap();
        assert_eq!(doc.todos.len(), 1);
        assert!(!doc.todos[0].id.is_empty());
        assert!(doc.todos[0].completed);
    }

    #[test]
    fn document_tolerates_missing_collections() {
        let doc: VaultDocument = serde_json::from_str(r#"{"todos":[]}"#).unwrap();
        assert!(doc.snippets.is_empty());
        assert!(doc.passwords.is_empty());
    }
}
