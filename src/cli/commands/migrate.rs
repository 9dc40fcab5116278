//! `proton-migrate migrate` — export the whole store to a Proton Pass CSV.

use crate::cli::commands::preset;
use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::{MigrateError, Result};
use crate::export;
use crate::migrate::{MigrationEvent, Migrator};
use crate::store::{PassReader, PassStore};

/// Execute the `migrate` command.
pub fn execute(cli: &Cli, output_path: Option<&str>, no_preset: bool) -> Result<()> {
    let mut settings = load_settings(cli)?;
    if let Some(path) = output_path {
        settings.output_file = path.to_string();
    }

    // 1. Best-effort passphrase caching; gpg can still prompt per entry.
    if settings.preset_passphrase && !no_preset {
        if let Err(e) = preset::preset_agent(&settings) {
            output::warning(&e.to_string());
            output::tip("You may need to enter the passphrase manually.");
        }
    }

    // 2. Enumerate and process every entry.
    let store = PassStore::new(settings.store_path(), &settings.entry_suffix);
    let reader = PassReader::new(&settings.pass_command, settings.read_timeout());

    let report = Migrator::new(store, reader).run(|event| match event {
        MigrationEvent::Started { total } => {
            output::info(&format!("Found {total} password entries to process"));
        }
        MigrationEvent::Processing { entry } => {
            output::info(&format!("Processing: {entry}"));
        }
        MigrationEvent::Failed { entry, error } => {
            output::warning(&failure_line(entry, error));
        }
    })?;

    output::info(&format!(
        "Successfully processed {} entries",
        report.summary()
    ));

    // 3. Write the CSV only if something was migrated.
    if report.records.is_empty() {
        output::warning("No entries were processed successfully; nothing written.");
        return Ok(());
    }

    let written = export::write_records(&settings.output_path(), &report.records)?;

    output::success(&format!("CSV file written to: {}", written.display()));
    output::info(&format!("Total entries in CSV: {}", report.records.len()));
    output::tip("The CSV holds plaintext passwords; delete it once Proton Pass has imported it.");

    Ok(())
}

/// `Failed to read <entry>: <reason>`, the line shown for each skipped entry.
fn failure_line(entry: &str, error: &MigrateError) -> String {
    match error {
        MigrateError::EntryUnreadable { reason, .. } => format!("Failed to read {entry}: {reason}"),
        other => format!("Failed to read {entry}: {other}"),
    }
}
