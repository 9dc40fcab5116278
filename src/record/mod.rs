//! Record module — the structured form of one password-store entry.
//!
//! This module provides:
//! - the `Record` type written to the Proton Pass CSV (this file)
//! - the line classifier that builds a `Record` from decrypted text (`classify`)

pub mod classify;

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

pub use classify::{classify, classify_line, LineKind, NOTE_SEPARATOR};

/// Column order of the Proton Pass import format.
pub const COLUMNS: [&str; 8] = [
    "name", "url", "email", "username", "password", "note", "totp", "vault",
];

/// One classified entry, ready for export.
///
/// Built once by [`classify`] and never mutated afterwards. The plaintext
/// is wiped from memory when the record is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Record {
    /// Entry identifier: store-relative path without the `.gpg` suffix.
    pub name: String,

    /// Never populated by classification.
    pub url: Option<String>,

    pub email: Option<String>,

    pub username: Option<String>,

    /// First line of the entry, trimmed. May be empty.
    pub password: String,

    /// Unclassified lines joined with [`NOTE_SEPARATOR`].
    pub note: Option<String>,

    /// Never populated by classification.
    pub totp: Option<String>,

    /// Destination vault; left for Proton Pass to assign.
    pub vault: Option<String>,
}

impl Record {
    /// A record with only `name` and `password` set.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            email: None,
            username: None,
            password: password.into(),
            note: None,
            totp: None,
            vault: None,
        }
    }

    /// Row values in [`COLUMNS`] order, with unset fields as empty strings.
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.name,
            self.url.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.username.as_deref().unwrap_or_default(),
            &self.password,
            self.note.as_deref().unwrap_or_default(),
            self.totp.as_deref().unwrap_or_default(),
            self.vault.as_deref().unwrap_or_default(),
        ]
    }
}

// Keep passwords out of logs and panic messages.
impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("note", &self.note)
            .field("totp", &self.totp)
            .field("vault", &self.vault)
            .finish()
    }
}
