//! `proton-migrate probe` — decrypt and classify a single entry.
//!
//! A quick check of how one entry will land in Proton Pass before
//! running the full migration. Nothing is written unless `--output`
//! is given.

use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::Result;
use crate::export;
use crate::record::classify;
use crate::store::{EntryReader, PassReader};

/// Execute the `probe` command.
pub fn execute(
    cli: &Cli,
    entry: &str,
    output_path: Option<&str>,
    show_password: bool,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let reader = PassReader::new(&settings.pass_command, settings.read_timeout());

    let raw = reader.read(entry)?;
    let record = classify(entry, &raw);

    output::print_record_table(&record, show_password);

    if let Some(dest) = output_path {
        let written = export::write_records(Path::new(dest), std::slice::from_ref(&record))?;
        output::success(&format!("Test CSV written to: {}", written.display()));
    }

    Ok(())
}
