//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::verifier::MIN_PASSWORD_LEN;
use crate::errors::{PocketVaultError, Result};
use crate::storage::FileStore;
use crate::vault::VaultSession;

/// PocketVault CLI: a master-password-protected personal data vault.
#[derive(Parser)]
#[command(
    name = "pocketvault",
    about = "Master-password-protected vault for todos, passwords, and snippets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory for config and data (default: current directory)
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Vault data file, overriding the configured path
    #[arg(long, global = true)]
    pub data_file: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the master password and create the vault
    Init,

    /// Show item counts and vault health
    Status,

    /// Manage to-do items
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Manage password credentials
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Manage code snippets
    Snippet {
        #[command(subcommand)]
        action: SnippetAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Todo subcommands.
#[derive(clap::Subcommand)]
pub enum TodoAction {
    /// Add a to-do item
    Add {
        /// The task text
        text: String,
    },

    /// List all to-do items
    List,

    /// Toggle completion of the first to-do matching the text
    Done {
        /// The task text
        text: String,
    },

    /// Remove the first to-do matching the text
    Remove {
        /// The task text
        text: String,
    },
}

/// Password subcommands.
#[derive(clap::Subcommand)]
pub enum PasswordAction {
    /// Add a password credential
    Add {
        /// Site or service name (e.g. example.com)
        site: String,
        /// Password value (omit for interactive prompt)
        value: Option<String>,
    },

    /// List stored sites
    List {
        /// Show decrypted password values
        #[arg(long)]
        show: bool,
    },

    /// Remove the first credential matching the site
    Remove {
        /// Site or service name
        site: String,
    },
}

/// Snippet subcommands.
#[derive(clap::Subcommand)]
pub enum SnippetAction {
    /// Add a code snippet
    Add {
        /// Snippet title
        title: String,
        /// Snippet code (omit to read from stdin)
        code: Option<String>,
    },

    /// List snippet titles
    List,

    /// Print the code of the first snippet matching the title
    Show {
        /// Snippet title
        title: String,
    },

    /// Remove the first snippet matching the title
    Remove {
        /// Snippet title
        title: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the base directory from CLI args (default: cwd).
pub fn base_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}

/// Resolve the vault data file path: `--data-file` beats the config.
pub fn data_path(cli: &Cli) -> Result<PathBuf> {
    let base = base_dir(cli)?;
    if let Some(file) = &cli.data_file {
        return Ok(base.join(file));
    }
    let settings = Settings::load(&base)?;
    Ok(settings.data_path(&base))
}

/// Build a locked session over the configured file store.
pub fn open_session(cli: &Cli) -> Result<VaultSession<FileStore>> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;
    let path = match &cli.data_file {
        Some(file) => base.join(file),
        None => settings.data_path(&base),
    };
    let store = FileStore::open(&path)?;
    Ok(VaultSession::new(store, settings.kdf_params()))
}

/// Build a session and unlock it with the master password.
///
/// Errors with `VaultNotInitialized` (plus a hint) when no vault
/// exists yet, and `WrongPassword` when verification fails.
pub fn unlock_session(cli: &Cli) -> Result<VaultSession<FileStore>> {
    let mut session = open_session(cli)?;

    if !session.has_vault() {
        output::tip("Run `pocketvault init` to set a master password first.");
        return Err(PocketVaultError::VaultNotInitialized);
    }

    let password = prompt_password()?;
    session.verify(&password)?;

    if session.dropped_entries() > 0 {
        output::warning(&format!(
            "{} password entr{} could not be decrypted with this master password and were skipped.",
            session.dropped_entries(),
            if session.dropped_entries() == 1 { "y" } else { "ies" }
        ));
    }

    Ok(session)
}

/// Get the master password, trying in order:
/// 1. `POCKETVAULT_PASSWORD` env var (scripts/tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("POCKETVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PocketVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `POCKETVAULT_PASSWORD` for scripted usage.
/// Enforces the minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("POCKETVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSWORD_LEN {
                return Err(PocketVaultError::WeakPassword(MIN_PASSWORD_LEN));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation("Confirm master password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PocketVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}
