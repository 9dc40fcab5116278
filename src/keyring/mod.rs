//! OS keyring storage for the GPG passphrase.
//!
//! Lets repeated migrations preset gpg-agent without a prompt:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! All operations fail gracefully: if the keyring is unavailable, the
//! error is returned and the caller falls back to a passphrase prompt.

use crate::errors::{MigrateError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "proton-migrate";

/// Keyring entries are per keygrip; an unset keygrip shares one slot.
fn entry_key(keygrip: &str) -> String {
    if keygrip.is_empty() {
        "gpg:default".to_string()
    } else {
        format!("gpg:{keygrip}")
    }
}

fn entry(keygrip: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, &entry_key(keygrip))
        .map_err(|e| MigrateError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Store the passphrase for `keygrip`.
pub fn store_passphrase(keygrip: &str, passphrase: &str) -> Result<()> {
    entry(keygrip)?.set_password(passphrase).map_err(|e| {
        MigrateError::KeyringError(format!("failed to store passphrase in keyring: {e}"))
    })
}

/// Retrieve the passphrase for `keygrip`.
///
/// Returns `None` if nothing is stored (rather than an error).
pub fn get_passphrase(keygrip: &str) -> Result<Option<String>> {
    match entry(keygrip)?.get_password() {
        Ok(passphrase) => Ok(Some(passphrase)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(MigrateError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Delete the stored passphrase for `keygrip`.
pub fn delete_passphrase(keygrip: &str) -> Result<()> {
    match entry(keygrip)?.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
        Err(e) => Err(MigrateError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}
