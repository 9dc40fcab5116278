//! `proton-migrate auth` — manage the stored GPG passphrase.
//!
//! Subcommands:
//! - `proton-migrate auth keyring`          — save passphrase to OS keyring
//! - `proton-migrate auth keyring --delete` — remove passphrase from keyring
//!
//! When the keyring feature is not compiled in, keyring commands return
//! a helpful error message.

use crate::cli::Cli;
use crate::errors::{MigrateError, Result};

/// Execute `proton-migrate auth keyring`: save or delete the passphrase.
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    #[cfg(feature = "keyring-store")]
    {
        use crate::cli::output;

        let settings = crate::cli::load_settings(cli)?;
        let keygrip = settings.keygrip.unwrap_or_default();

        if delete {
            crate::keyring::delete_passphrase(&keygrip)?;
            output::success("Passphrase removed from OS keyring.");
        } else {
            // Prompt directly; a keyring lookup here would just echo the old value.
            let passphrase = dialoguer::Password::new()
                .with_prompt("GPG passphrase to store")
                .interact()
                .map(zeroize::Zeroizing::new)
                .map_err(|e| MigrateError::CommandFailed(format!("passphrase prompt: {e}")))?;

            crate::keyring::store_passphrase(&keygrip, &passphrase)?;
            output::success("Passphrase saved to OS keyring. Future presets will be automatic.");
        }

        Ok(())
    }

    #[cfg(not(feature = "keyring-store"))]
    {
        let _ = (cli, delete);
        Err(MigrateError::KeyringError(
            "keyring support not compiled — rebuild with `cargo build --features keyring-store`"
                .into(),
        ))
    }
}
