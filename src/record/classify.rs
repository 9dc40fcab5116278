//! Heuristic line classifier for decrypted `pass` entries.
//!
//! The `pass` convention is loose: the first line is the password and
//! everything after it is free-form. Each later line is matched on its own:
//!
//! 1. any line containing `@` is an email (`email: a@b.c` or a bare `a@b.c`)
//! 2. `username:`, `user:` or `login:` (any case) introduces a username
//! 3. everything else is kept as a note fragment
//!
//! Later matches overwrite earlier ones; blank lines are dropped.

use zeroize::{Zeroize, Zeroizing};

use super::Record;

/// Joins note fragments into a single CSV cell.
pub const NOTE_SEPARATOR: &str = " | ";

/// Prefixes (compared lowercase) that mark a username line.
const USERNAME_PREFIXES: &[&str] = &["username:", "user:", "login:"];

/// What a single trimmed, non-blank line contributes to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Email(&'a str),
    Username(&'a str),
    Note(&'a str),
}

/// Classify one line that has already been trimmed and is not blank.
///
/// Email wins over username: `username: bob@x.com` is an email.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.contains('@') {
        // Everything after the first colon, even if the address is not
        // the only thing there (`note: see bob@x.com` -> `see bob@x.com`).
        let email = line.split_once(':').map_or(line, |(_, rest)| rest.trim());
        return LineKind::Email(email);
    }

    let lower = Zeroizing::new(line.to_lowercase());
    if USERNAME_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        let username = line.split_once(':').map_or("", |(_, rest)| rest.trim());
        return LineKind::Username(username);
    }

    LineKind::Note(line)
}

/// Build a [`Record`] from the raw decrypted content of an entry.
///
/// Never fails: empty or oddly shaped content just yields fewer fields.
pub fn classify(name: &str, raw: &str) -> Record {
    if raw.is_empty() {
        return Record::new(name, "");
    }

    let mut lines = raw.split('\n');
    let password = lines.next().unwrap_or_default().trim();

    let mut record = Record::new(name, password);
    let mut notes: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match classify_line(line) {
            LineKind::Email(email) => {
                replace_wiped(&mut record.email, email);
            }
            LineKind::Username(user) => {
                replace_wiped(&mut record.username, user);
            }
            LineKind::Note(text) => notes.push(text),
        }
    }

    if !notes.is_empty() {
        record.note = Some(notes.join(NOTE_SEPARATOR));
    }

    record
}

/// Store `value` in `slot`, wiping whatever it held before.
///
/// Returns the previous value, already zeroized (and therefore empty).
fn replace_wiped(slot: &mut Option<String>, value: &str) -> Option<String> {
    let mut previous = slot.replace(value.to_string());
    if let Some(old) = previous.as_mut() {
        old.zeroize();
    }
    previous
}
