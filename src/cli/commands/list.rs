//! `proton-migrate list` — show the entries found in the store.

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::Result;
use crate::store::{EntrySource, PassStore};

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = PassStore::new(settings.store_path(), &settings.entry_suffix);

    let entries = store.entries()?;
    output::print_entries_table(&entries);

    if !entries.is_empty() {
        output::info(&format!(
            "{} entries in {}",
            entries.len(),
            store.root().display()
        ));
    }

    Ok(())
}
