//! Entry enumeration over a `pass` store directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{MigrateError, Result};

/// Anything that can list entry identifiers.
pub trait EntrySource {
    /// All entry identifiers, in the order they should be processed.
    fn entries(&self) -> Result<Vec<String>>;
}

/// A password store on disk: every `<suffix>` file under `root` is an entry.
#[derive(Debug, Clone)]
pub struct PassStore {
    root: PathBuf,
    suffix: String,
}

impl PassStore {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn an entry file path into its identifier, e.g.
    /// `<root>/web/github.gpg` -> `web/github`.
    ///
    /// Returns `None` for paths outside the root or without the suffix.
    pub fn entry_id(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        let joined = parts.join("/");

        let id = joined.strip_suffix(self.suffix.as_str())?;
        if id.is_empty() || id.ends_with('/') {
            return None;
        }
        Some(id.to_string())
    }
}

impl EntrySource for PassStore {
    fn entries(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(MigrateError::StoreNotFound(self.root.clone()));
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(id) = self.entry_id(entry.path()) {
                ids.push(id);
            }
        }

        Ok(ids)
    }
}
