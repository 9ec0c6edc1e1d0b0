//! `pocketvault init` — set the master password and create the vault.

use crate::cli::output;
use crate::cli::{data_path, open_session, prompt_new_password, Cli};
use crate::errors::{PocketVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut session = open_session(cli)?;

    if session.has_vault() {
        output::tip("The master password cannot be changed once set.");
        return Err(PocketVaultError::AlreadyInitialized);
    }

    output::info("The master password protects your stored passwords. It cannot be recovered.");
    let password = prompt_new_password()?;

    session.initialize(&password)?;
    session.save()?;

    output::success(&format!(
        "Vault created at {}",
        data_path(cli)?.display()
    ));
    output::tip("Run `pocketvault todo add <TEXT>` to add a to-do.");
    output::tip("Run `pocketvault password add <SITE>` to store a password.");
    output::tip("Run `pocketvault snippet add <TITLE>` to save a snippet.");

    Ok(())
}
