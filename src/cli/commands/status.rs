//! `pocketvault status` — show item counts and vault health.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = unlock_session(cli)?;
    let working = session.working_set()?;

    output::info(&format!(
        "{} to-do(s), {} password(s), {} snippet(s)",
        working.todos.len(),
        working.passwords.len(),
        working.snippets.len()
    ));

    let dropped = session.dropped_entries();
    if dropped > 0 {
        output::warning(&format!(
            "{dropped} stored password entr{} could not be decrypted and {} not shown.",
            if dropped == 1 { "y" } else { "ies" },
            if dropped == 1 { "is" } else { "are" }
        ));
        output::tip("Entries written under a different master password stay in storage until overwritten by a save.");
    } else {
        output::success("All stored entries decrypted cleanly.");
    }

    Ok(())
}
