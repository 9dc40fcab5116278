//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{MigrateError, Result};

/// proton-migrate: move a `pass` password store into Proton Pass.
#[derive(Parser)]
#[command(
    name = "proton-migrate",
    about = "Migrate a pass password store to a Proton Pass import CSV",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/proton-migrate/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Password store directory (default: ~/.password-store)
    #[arg(long, env = "PASSWORD_STORE_DIR", global = true)]
    pub store_dir: Option<String>,

    /// Command used to decrypt an entry (default: pass)
    #[arg(long, global = true)]
    pub pass_command: Option<String>,

    /// Seconds to wait for each entry to decrypt (default: 30)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Keygrip of the GPG encryption subkey, for passphrase presetting
    #[arg(long, env = "ENCRYPTION_KEYGRIP", global = true)]
    pub keygrip: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Export every entry in the store to a Proton Pass CSV
    Migrate {
        /// Output CSV path (default: ~/.proton-migrate/protonpass.csv)
        #[arg(short, long)]
        output: Option<String>,

        /// Skip presetting the GPG passphrase in gpg-agent
        #[arg(long)]
        no_preset: bool,
    },

    /// List the entries that would be migrated
    List,

    /// Decrypt and classify a single entry (dry run)
    Probe {
        /// Entry name (e.g. web/github)
        entry: String,

        /// Also write the classified entry as a one-row CSV
        #[arg(short, long)]
        output: Option<String>,

        /// Show the password instead of masking it
        #[arg(long)]
        show_password: bool,
    },

    /// Preset the GPG passphrase in gpg-agent and exit
    Preset,

    /// Manage the stored GPG passphrase
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Auth subcommands for keyring management.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the GPG passphrase to the OS keyring
    Keyring {
        /// Remove the passphrase from the keyring instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve settings: CLI flags and env vars over the config file over defaults.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let config_path = match &cli.config {
        Some(path) => Some(PathBuf::from(path)),
        None => Settings::default_path(),
    };

    let mut settings = match config_path {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    if let Some(dir) = &cli.store_dir {
        settings.store_dir = dir.clone();
    }
    if let Some(command) = &cli.pass_command {
        settings.pass_command = command.clone();
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(MigrateError::CommandFailed(
                "--timeout must be at least 1 second".into(),
            ));
        }
        settings.read_timeout_secs = secs;
    }
    if let Some(keygrip) = &cli.keygrip {
        if !keygrip.is_empty() {
            settings.keygrip = Some(keygrip.clone());
        }
    }

    Ok(settings)
}

/// Get the GPG passphrase, trying in order:
/// 1. `GPG_PASSPHRASE` env var (scripted runs)
/// 2. OS keyring (if compiled with `keyring-store` feature)
/// 3. Interactive masked prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase(keygrip: &str) -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first.
    if let Ok(pw) = std::env::var("GPG_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // 2. Try the OS keyring (if feature enabled).
    #[cfg(feature = "keyring-store")]
    match crate::keyring::get_passphrase(keygrip) {
        Ok(Some(pw)) => return Ok(Zeroizing::new(pw)),
        Ok(None) => {} // No stored passphrase, continue to prompt.
        Err(_) => {}   // Keyring unavailable, continue to prompt.
    }

    // Suppress unused variable warning when keyring feature is off.
    #[cfg(not(feature = "keyring-store"))]
    let _ = keygrip;

    // 3. Fall back to interactive prompt.
    let pw = dialoguer::Password::new()
        .with_prompt("Enter GPG passphrase")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| MigrateError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
