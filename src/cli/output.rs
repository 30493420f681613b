//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::store::CredentialEntry;

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

/// Print a table of stored credentials (Id, Website, Username).
///
/// Passwords are never shown here; they stay in ciphertext form until
/// an explicit `reveal`.
pub fn print_credentials_table(entries: &[CredentialEntry]) {
    if entries.is_empty() {
        info("No credentials stored yet.");
        tip("Run `passvault add <WEBSITE> <USERNAME>` to store your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Website", "Username"]);

    for entry in entries {
        table.add_row(vec![
            entry.id.to_string(),
            entry.website.clone(),
            entry.username.clone(),
        ]);
    }

    println!("{table}");
}
