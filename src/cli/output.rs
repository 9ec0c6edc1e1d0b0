//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{PasswordEntry, SnippetItem, TodoItem};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of to-do items (Done, Task).
pub fn print_todos_table(todos: &[TodoItem]) {
    if todos.is_empty() {
        info("No to-dos yet.");
        tip("Run `pocketvault todo add <TEXT>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Done", "Task"]);

    for t in todos {
        let mark = if t.completed { "\u{2713}" } else { "" };
        table.add_row(vec![mark.to_string(), t.text.clone()]);
    }

    println!("{table}");
}

/// Print a table of password credentials (Site, Value).
///
/// Values stay masked unless `show_values` is set.
pub fn print_passwords_table(passwords: &[PasswordEntry], show_values: bool) {
    if passwords.is_empty() {
        info("No passwords stored yet.");
        tip("Run `pocketvault password add <SITE>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Value"]);

    for p in passwords {
        let value = if show_values {
            p.value.clone()
        } else {
            "\u{2022}".repeat(8)
        };
        table.add_row(vec![p.site.clone(), value]);
    }

    println!("{table}");
}

/// Print a table of snippet titles (Title, Lines).
pub fn print_snippets_table(snippets: &[SnippetItem]) {
    if snippets.is_empty() {
        info("No snippets yet.");
        tip("Run `pocketvault snippet add <TITLE> <CODE>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Lines"]);

    for s in snippets {
        table.add_row(vec![s.title.clone(), s.code.lines().count().to_string()]);
    }

    println!("{table}");
}
