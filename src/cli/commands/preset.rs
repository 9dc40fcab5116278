//! `proton-migrate preset` — cache the GPG passphrase in gpg-agent.

use crate::cli::output;
use crate::cli::{load_settings, prompt_passphrase, Cli};
use crate::config::Settings;
use crate::errors::{MigrateError, Result};
use crate::gpg;

/// Execute the `preset` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    preset_agent(&settings)
}

/// Preset the passphrase for the configured keygrip.
///
/// An empty passphrase skips presetting and is not an error.
pub fn preset_agent(settings: &Settings) -> Result<()> {
    let keygrip = settings.keygrip.as_deref().unwrap_or_default();
    if keygrip.is_empty() {
        return Err(MigrateError::PassphraseSetupFailure(
            "no keygrip configured — set ENCRYPTION_KEYGRIP or `keygrip` in the config".into(),
        ));
    }

    let passphrase = prompt_passphrase(keygrip)?;
    if passphrase.is_empty() {
        output::info("No passphrase given; gpg will prompt per entry if needed.");
        return Ok(());
    }

    output::info(&format!("Setting passphrase for keygrip: {keygrip}"));
    let helper = gpg::locate_preset_binary()?;
    gpg::preset_passphrase(&helper, keygrip, &passphrase)?;

    output::success(&format!("Passphrase preset for keygrip {keygrip}"));
    Ok(())
}
