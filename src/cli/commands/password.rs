//! `pocketvault password` — add, list, and remove password credentials.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{unlock_session, Cli, PasswordAction};
use crate::errors::{PocketVaultError, Result};

/// Execute a `password` subcommand.
pub fn execute(cli: &Cli, action: &PasswordAction) -> Result<()> {
    match action {
        PasswordAction::Add { site, value } => {
            // Determine the value before asking for the master password,
            // so a cancelled prompt costs nothing.
            let value = resolve_value(site, value.as_deref())?;

            let mut session = unlock_session(cli)?;
            session.add_password(site, &value)?;
            output::success(&format!(
                "Password for '{}' stored ({} total)",
                site,
                session.working_set()?.passwords.len()
            ));
        }
        PasswordAction::List { show } => {
            let session = unlock_session(cli)?;
            output::print_passwords_table(&session.working_set()?.passwords, *show);
        }
        PasswordAction::Remove { site } => {
            let mut session = unlock_session(cli)?;
            let known = session
                .working_set()?
                .passwords
                .iter()
                .any(|p| p.site == *site);
            session.remove_password(site)?;
            if known {
                output::success(&format!("Removed credential for '{site}'"));
            } else {
                output::warning(&format!("No credential matches '{site}' — nothing removed."));
            }
        }
    }

    Ok(())
}

/// Resolve the password value from one of three sources.
fn resolve_value(site: &str, inline: Option<&str>) -> Result<String> {
    if let Some(v) = inline {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok(v.to_string());
    }

    if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf.trim_end().to_string());
    }

    // Source 3: Interactive secure prompt (default).
    dialoguer::Password::new()
        .with_prompt(format!("Enter password for {site}"))
        .interact()
        .map_err(|e| PocketVaultError::CommandFailed(format!("input prompt: {e}")))
}
