//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::record::Record;

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

/// Print a numbered table of entry identifiers.
pub fn print_entries_table(entries: &[String]) {
    if entries.is_empty() {
        info("No entries found in the password store.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Entry"]);

    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), entry.clone()]);
    }

    println!("{table}");
}

/// Print one record as a Field/Value table, masking the password
/// unless `show_password` is set.
pub fn print_record_table(record: &Record, show_password: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let password = if show_password {
        record.password.clone()
    } else {
        mask(&record.password)
    };

    let rows = [
        ("name", record.name.clone()),
        ("email", record.email.clone().unwrap_or_default()),
        ("username", record.username.clone().unwrap_or_default()),
        ("password", password),
        ("note", record.note.clone().unwrap_or_default()),
    ];

    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }

    println!("{table}");
}

/// `********` for any non-empty secret, `(empty)` otherwise.
fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "(empty)".to_string()
    } else {
        "*".repeat(8)
    }
}
