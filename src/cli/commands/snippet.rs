//! `pocketvault snippet` — add, list, show, and remove code snippets.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{unlock_session, Cli, SnippetAction};
use crate::errors::{PocketVaultError, Result};

/// Execute a `snippet` subcommand.
pub fn execute(cli: &Cli, action: &SnippetAction) -> Result<()> {
    match action {
        SnippetAction::Add { title, code } => {
            let code = resolve_code(code.as_deref())?;

            let mut session = unlock_session(cli)?;
            session.add_snippet(title, &code)?;
            output::success(&format!(
                "Snippet '{}' saved ({} total)",
                title,
                session.working_set()?.snippets.len()
            ));
        }
        SnippetAction::List => {
            let session = unlock_session(cli)?;
            output::print_snippets_table(&session.working_set()?.snippets);
        }
        SnippetAction::Show { title } => {
            let session = unlock_session(cli)?;
            let working = session.working_set()?;
            match working.snippets.iter().find(|s| s.title == *title) {
                Some(snippet) => println!("{}", snippet.code),
                None => {
                    return Err(PocketVaultError::CommandFailed(format!(
                        "no snippet titled '{title}'"
                    )))
                }
            }
        }
        SnippetAction::Remove { title } => {
            let mut session = unlock_session(cli)?;
            let known = session
                .working_set()?
                .snippets
                .iter()
                .any(|s| s.title == *title);
            session.remove_snippet(title)?;
            if known {
                output::success(&format!("Removed snippet '{title}'"));
            } else {
                output::warning(&format!("No snippet matches '{title}' — nothing removed."));
            }
        }
    }

    Ok(())
}

/// Resolve the snippet code: inline argument, else piped stdin.
fn resolve_code(inline: Option<&str>) -> Result<String> {
    if let Some(code) = inline {
        return Ok(code.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf.trim_end().to_string());
    }

    Err(PocketVaultError::CommandFailed(
        "no snippet code given — pass it as an argument or pipe it on stdin".into(),
    ))
}
