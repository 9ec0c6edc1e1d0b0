//! `pocketvault todo` — add, list, toggle, and remove to-do items.

use crate::cli::output;
use crate::cli::{unlock_session, Cli, TodoAction};
use crate::errors::Result;

/// Execute a `todo` subcommand.
pub fn execute(cli: &Cli, action: &TodoAction) -> Result<()> {
    let mut session = unlock_session(cli)?;

    match action {
        TodoAction::Add { text } => {
            session.add_todo(text)?;
            output::success(&format!(
                "To-do added ({} total)",
                session.working_set()?.todos.len()
            ));
        }
        TodoAction::List => {
            output::print_todos_table(&session.working_set()?.todos);
        }
        TodoAction::Done { text } => {
            let known = session.working_set()?.todos.iter().any(|t| t.text == *text);
            session.toggle_todo(text)?;
            if known {
                output::success(&format!("Toggled '{text}'"));
            } else {
                output::warning(&format!("No to-do matches '{text}' — nothing toggled."));
            }
        }
        TodoAction::Remove { text } => {
            let known = session.working_set()?.todos.iter().any(|t| t.text == *text);
            session.remove_todo(text)?;
            if known {
                output::success(&format!("Removed '{text}'"));
            } else {
                output::warning(&format!("No to-do matches '{text}' — nothing removed."));
            }
        }
    }

    Ok(())
}
