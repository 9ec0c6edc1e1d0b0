//! The vault session: lock/unlock state machine and mutation API.
//!
//! A session starts `Locked`. `initialize` (first run) or `verify`
//! (returning user) transitions it to `Unlocked`, immediately followed
//! by a `load()` that populates the in-memory working set. Every
//! mutation goes through load → mutate → save; the save projection
//! encrypts password values, so no plaintext password ever reaches
//! storage.
//!
//! Entries that fail to decrypt during `load()` — typically written
//! under a different master password — are dropped from the working set
//! rather than treated as fatal. The drop count is kept so callers can
//! surface it.
//!
//! Single mutator by construction: all operations take `&mut self` and
//! run to completion, so saves observe every prior mutation in call
//! order.

use crate::crypto::{codec, verifier::KeyRecord, KdfParams, SessionKey};
use crate::errors::{PocketVaultError, Result};
use crate::storage::KeyValueStore;

use super::document::{
    EncryptedPassword, PasswordEntry, SnippetItem, TodoItem, VaultDocument, WorkingSet,
};
use super::store::VaultStore;

/// Session state. The key and working set exist only while unlocked;
/// dropping the state zeroizes the key.
enum SessionState {
    Locked,
    Unlocked {
        key: SessionKey,
        working: WorkingSet,
        /// Entries silently excluded by the last `load()` because they
        /// failed to decrypt under the current key.
        dropped: usize,
    },
}

/// A single-user vault session over any `KeyValueStore`.
pub struct VaultSession<S: KeyValueStore> {
    store: VaultStore<S>,
    params: KdfParams,
    state: SessionState,
}

impl<S: KeyValueStore> VaultSession<S> {
    /// Create a locked session over the given storage.
    pub fn new(store: S, params: KdfParams) -> Self {
        Self {
            store: VaultStore::new(store),
            params,
            state: SessionState::Locked,
        }
    }

    // ------------------------------------------------------------------
    // Unlock flow
    // ------------------------------------------------------------------

    /// True iff a master-key record exists in storage.
    pub fn has_vault(&self) -> bool {
        self.store.has_key_record()
    }

    /// First-run setup: derive and persist the master-key record from
    /// `candidate`, then unlock and load.
    ///
    /// Fails with `WeakPassword` below the minimum length and
    /// `AlreadyInitialized` if a record already exists — there is no
    /// password-change operation, so an existing record is permanent.
    pub fn initialize(&mut self, candidate: &str) -> Result<()> {
        if self.has_vault() {
            return Err(PocketVaultError::AlreadyInitialized);
        }

        let (record, key) = KeyRecord::create(candidate, &self.params)?;
        self.store.write_key_record(&record)?;

        self.state = SessionState::Unlocked {
            key,
            working: WorkingSet::default(),
            dropped: 0,
        };
        self.load()
    }

    /// Verify `candidate` against the stored fingerprint and unlock.
    ///
    /// On mismatch the session stays `Locked` with no key set. On match
    /// the derived session key becomes active and `load()` runs.
    pub fn verify(&mut self, candidate: &str) -> Result<()> {
        let record = self
            .store
            .read_key_record()?
            .ok_or(PocketVaultError::VaultNotInitialized)?;

        let key = record.check(candidate, &self.params)?;

        self.state = SessionState::Unlocked {
            key,
            working: WorkingSet::default(),
            dropped: 0,
        };
        self.load()
    }

    /// Drop the session key and working set, returning to `Locked`.
    ///
    /// The key bytes are zeroized on drop. Nothing is written: unsaved
    /// working-set changes are discarded, matching process teardown.
    pub fn lock(&mut self) {
        self.state = SessionState::Locked;
    }

    /// True while a session key is active.
    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked { .. })
    }

    // ------------------------------------------------------------------
    // Load / save cycle
    // ------------------------------------------------------------------

    /// Rebuild the working set from storage. Requires `Unlocked`.
    ///
    /// Todos and snippets are copied verbatim. Each stored password is
    /// decrypted with the session key and kept only if decryption
    /// succeeded; the rest are counted in `dropped_entries`. An absent
    /// or malformed document loads as an empty vault.
    pub fn load(&mut self) -> Result<()> {
        let doc = self.store.read_document().unwrap_or_default();

        let SessionState::Unlocked {
            key,
            working,
            dropped,
        } = &mut self.state
        else {
            return Err(PocketVaultError::VaultLocked);
        };

        let mut passwords = Vec::with_capacity(doc.passwords.len());
        let mut failed = 0;
        for entry in &doc.passwords {
            match codec::decrypt(key, &entry.value) {
                Some(plaintext) => passwords.push(PasswordEntry::new(entry.site.as_str(), plaintext)),
                None => failed += 1,
            }
        }

        *working = WorkingSet {
            todos: doc.todos,
            snippets: doc.snippets,
            passwords,
        };
        *dropped = failed;

        Ok(())
    }

    /// Project the working set to a `VaultDocument` — encrypting every
    /// password value — and persist it.
    ///
    /// A no-op returning `Ok` while `Locked`: storage is not touched.
    /// Write failures propagate; hiding a persistence failure would
    /// silently lose data.
    pub fn save(&mut self) -> Result<()> {
        let SessionState::Unlocked { key, working, .. } = &self.state else {
            return Ok(());
        };

        let mut passwords = Vec::with_capacity(working.passwords.len());
        for entry in &working.passwords {
            passwords.push(EncryptedPassword {
                site: entry.site.clone(),
                value: codec::encrypt(key, &entry.value)?,
            });
        }

        let doc = VaultDocument {
            todos: working.todos.clone(),
            snippets: working.snippets.clone(),
            passwords,
        };

        self.store.write_document(&doc)
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The in-memory decrypted working set. Requires `Unlocked`.
    pub fn working_set(&self) -> Result<&WorkingSet> {
        match &self.state {
            SessionState::Unlocked { working, .. } => Ok(working),
            SessionState::Locked => Err(PocketVaultError::VaultLocked),
        }
    }

    /// How many stored password entries the last `load()` dropped
    /// because they failed to decrypt. Zero while locked.
    pub fn dropped_entries(&self) -> usize {
        match &self.state {
            SessionState::Unlocked { dropped, .. } => *dropped,
            SessionState::Locked => 0,
        }
    }

    /// Read-only access to the typed storage layer (e.g. for callers
    /// that want to inspect the at-rest document).
    pub fn store(&self) -> &VaultStore<S> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Mutations
    //
    // Each validates its input, mutates the working set, then saves.
    // Natural-key operations use first-match semantics when duplicate
    // keys exist; the `*_by_id` variants are unambiguous.
    // ------------------------------------------------------------------

    /// Add a to-do item. The text is trimmed; empty input is rejected.
    pub fn add_todo(&mut self, text: &str) -> Result<()> {
        let text = non_empty(text, "todo text")?;
        self.working_mut()?.todos.push(TodoItem::new(text));
        self.save()
    }

    /// Toggle completion of the first to-do whose text matches.
    pub fn toggle_todo(&mut self, text: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(todo) = working.todos.iter_mut().find(|t| t.text == text) {
            todo.completed = !todo.completed;
        }
        self.save()
    }

    /// Toggle completion of the to-do with the given id.
    pub fn toggle_todo_by_id(&mut self, id: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(todo) = working.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = !todo.completed;
        }
        self.save()
    }

    /// Remove the first to-do whose text matches. Missing keys are a
    /// no-op; the save still runs.
    pub fn remove_todo(&mut self, text: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.todos.iter().position(|t| t.text == text) {
            working.todos.remove(pos);
        }
        self.save()
    }

    /// Remove the to-do with the given id.
    pub fn remove_todo_by_id(&mut self, id: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.todos.iter().position(|t| t.id == id) {
            working.todos.remove(pos);
        }
        self.save()
    }

    /// Add a password credential. Site and value are trimmed; empty
    /// input is rejected.
    pub fn add_password(&mut self, site: &str, value: &str) -> Result<()> {
        let site = non_empty(site, "site name")?;
        let value = non_empty(value, "password value")?;
        self.working_mut()?
            .passwords
            .push(PasswordEntry::new(site, value));
        self.save()
    }

    /// Remove the first password whose site matches.
    pub fn remove_password(&mut self, site: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.passwords.iter().position(|p| p.site == site) {
            working.passwords.remove(pos);
        }
        self.save()
    }

    /// Remove the password with the given id.
    pub fn remove_password_by_id(&mut self, id: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.passwords.iter().position(|p| p.id == id) {
            working.passwords.remove(pos);
        }
        self.save()
    }

    /// Add a code snippet. Title and code are trimmed; empty input is
    /// rejected.
    pub fn add_snippet(&mut self, title: &str, code: &str) -> Result<()> {
        let title = non_empty(title, "snippet title")?;
        let code = non_empty(code, "snippet code")?;
        self.working_mut()?
            .snippets
            .push(SnippetItem::new(title, code));
        self.save()
    }

    /// Remove the first snippet whose title matches.
    pub fn remove_snippet(&mut self, title: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.snippets.iter().position(|s| s.title == title) {
            working.snippets.remove(pos);
        }
        self.save()
    }

    /// Remove the snippet with the given id.
    pub fn remove_snippet_by_id(&mut self, id: &str) -> Result<()> {
        let working = self.working_mut()?;
        if let Some(pos) = working.snippets.iter().position(|s| s.id == id) {
            working.snippets.remove(pos);
        }
        self.save()
    }

    fn working_mut(&mut self) -> Result<&mut WorkingSet> {
        match &mut self.state {
            SessionState::Unlocked { working, .. } => Ok(working),
            SessionState::Locked => Err(PocketVaultError::VaultLocked),
        }
    }
}

/// Trim the input and reject it if nothing remains.
fn non_empty(input: &str, what: &'static str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PocketVaultError::EmptyInput(what));
    }
    Ok(trimmed.to_string())
}
