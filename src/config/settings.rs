use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{MigrateError, Result};

/// Migration settings, loaded from `~/.config/proton-migrate/config.toml`.
///
/// Every field has a sensible default so the tool works out-of-the-box
/// against a standard `pass` setup without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the password store (default: `~/.password-store`).
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Where the Proton Pass CSV is written.
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Command that prints a decrypted entry: `<pass_command> <entry>`.
    #[serde(default = "default_pass_command")]
    pub pass_command: String,

    /// Suffix of encrypted entry files.
    #[serde(default = "default_entry_suffix")]
    pub entry_suffix: String,

    /// Per-entry decryption timeout in seconds (default: 30).
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Preset the GPG passphrase in gpg-agent before reading entries.
    #[serde(default = "default_preset_passphrase")]
    pub preset_passphrase: bool,

    /// Keygrip of the encryption subkey to preset.
    #[serde(default)]
    pub keygrip: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_dir() -> String {
    "~/.password-store".to_string()
}

fn default_output_file() -> String {
    "~/.proton-migrate/protonpass.csv".to_string()
}

fn default_pass_command() -> String {
    "pass".to_string()
}

fn default_entry_suffix() -> String {
    ".gpg".to_string()
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_preset_passphrase() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            output_file: default_output_file(),
            pass_command: default_pass_command(),
            entry_suffix: default_entry_suffix(),
            read_timeout_secs: default_read_timeout_secs(),
            preset_passphrase: default_preset_passphrase(),
            keygrip: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            MigrateError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Default config file location: `~/.config/proton-migrate/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let home = home_dir()?;
        Some(
            home.join(".config")
                .join("proton-migrate")
                .join("config.toml"),
        )
    }

    /// Absolute-ish store root with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        expand_home(&self.store_dir)
    }

    /// Output file with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_home(&self.output_file)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// The user's home directory from `$HOME` (or `%USERPROFILE%`).
pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` or `~/` to the home directory.
///
/// Paths without a tilde, and `~user` forms, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
