use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while migrating a password store.
#[derive(Debug, Error)]
pub enum MigrateError {
    // --- Entry errors (recovered per entry) ---
    #[error("could not read '{entry}': {reason}")]
    EntryUnreadable { entry: String, reason: String },

    // --- Store errors ---
    #[error("Password store not found at {0}")]
    StoreNotFound(PathBuf),

    // --- Output errors (fatal) ---
    #[error("Failed to write {path}: {reason}")]
    OutputWriteFailure { path: PathBuf, reason: String },

    // --- GPG agent errors (recovered with a warning) ---
    #[error("Passphrase setup failed: {0}")]
    PassphraseSetupFailure(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl MigrateError {
    /// Shorthand for an `EntryUnreadable` error.
    pub fn unreadable(entry: &str, reason: impl Into<String>) -> Self {
        Self::EntryUnreadable {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an `OutputWriteFailure` error.
    pub fn output(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::OutputWriteFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for migration results.
pub type Result<T> = std::result::Result<T, MigrateError>;
