//! gpg-agent passphrase presetting.
//!
//! Migrating a large store means one decryption per entry. Presetting the
//! passphrase in gpg-agent up front (via `gpg-preset-passphrase`) lets
//! those decryptions run without a pinentry prompt each time.
//!
//! Everything here is best-effort: the caller reports failures as a
//! warning and carries on, since pinentry can still prompt per entry.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{MigrateError, Result};

/// Name of the GnuPG helper binary.
const PRESET_BINARY: &str = "gpg-preset-passphrase";

/// Where to look when `gpgconf` is unavailable.
const FALLBACK_PATHS: &[&str] = &[
    "/usr/local/bin/gpg-preset-passphrase",
    "/usr/bin/gpg-preset-passphrase",
    "/opt/homebrew/bin/gpg-preset-passphrase",
    "/usr/local/Cellar/gnupg/2.4.5_1/libexec/gpg-preset-passphrase",
];

/// Find `gpg-preset-passphrase`.
///
/// Asks `gpgconf --list-dirs libexecdir` first and falls back to a list
/// of well-known install locations.
pub fn locate_preset_binary() -> Result<PathBuf> {
    if let Some(libexec) = gpgconf_libexecdir() {
        return Ok(libexec.join(PRESET_BINARY));
    }

    let fallbacks: Vec<&Path> = FALLBACK_PATHS.iter().map(Path::new).collect();
    first_existing(&fallbacks).ok_or_else(|| {
        MigrateError::PassphraseSetupFailure(format!(
            "could not find {PRESET_BINARY} — please ensure GnuPG is properly installed"
        ))
    })
}

/// The GnuPG libexec directory, or `None` if `gpgconf` failed.
fn gpgconf_libexecdir() -> Option<PathBuf> {
    let output = Command::new("gpgconf")
        .args(["--list-dirs", "libexecdir"])
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if dir.is_empty() {
        None
    } else {
        Some(PathBuf::from(dir))
    }
}

fn first_existing(candidates: &[&Path]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|p| p.exists())
        .map(|p| p.to_path_buf())
}

/// Preset `passphrase` for `keygrip` using the helper at `helper`.
///
/// The passphrase is written to the helper's stdin, never passed as an
/// argument, so it does not show up in the process list.
pub fn preset_passphrase(helper: &Path, keygrip: &str, passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(MigrateError::PassphraseSetupFailure(
            "empty passphrase".into(),
        ));
    }

    let mut child = Command::new(helper)
        .args(["--preset", keygrip])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            MigrateError::PassphraseSetupFailure(format!(
                "failed to run {}: {e}",
                helper.display()
            ))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // A helper that exits early closes its stdin; the exit status
        // below is what decides success.
        let _ = stdin.write_all(passphrase.as_bytes());
    }

    let output = child.wait_with_output().map_err(|e| {
        MigrateError::PassphraseSetupFailure(format!("failed to wait for helper: {e}"))
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(MigrateError::PassphraseSetupFailure(format!(
            "failed to preset passphrase for keygrip {keygrip}: {}",
            stderr.trim()
        )))
    }
}
