//! End-to-end tests of the library pipeline:
//! store walk → read → classify → CSV export → re-parse.

use std::fs;
use std::path::{Path, PathBuf};

use proton_migrate::errors::{MigrateError, Result};
use proton_migrate::export::write_records;
use proton_migrate::migrate::Migrator;
use proton_migrate::record::COLUMNS;
use proton_migrate::store::{EntryReader, PassStore};
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Reads the "encrypted" file as plaintext, standing in for `pass`.
/// Entries whose content starts with `!fail` behave like a decryption error.
struct PlainFileReader {
    root: PathBuf,
}

impl EntryReader for PlainFileReader {
    fn read(&self, entry: &str) -> Result<Zeroizing<String>> {
        let path = self.root.join(format!("{entry}.gpg"));
        let content = fs::read_to_string(&path)
            .map_err(|e| MigrateError::unreadable(entry, e.to_string()))?;
        if content.starts_with("!fail") {
            return Err(MigrateError::unreadable(entry, "gpg: decryption failed"));
        }
        Ok(Zeroizing::new(content.trim().to_string()))
    }
}

fn write_entry(root: &Path, id: &str, content: &str) {
    let path = root.join(format!("{id}.gpg"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn store_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".gpg-id"), "ABCDEF\n").unwrap();

    write_entry(
        root,
        "email/personal",
        "  mail-pass  \nemail: me@example.com\n\nrecovery codes in safe\n",
    );
    write_entry(root, "web/github", "gh-pass\nlogin: octocat\n2fa enabled");
    write_entry(root, "web/broken", "!fail");
    write_entry(root, "wifi", "wifi-pass");
    dir
}

#[test]
fn full_pipeline_produces_expected_csv() {
    let store_dir = store_fixture();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("export/protonpass.csv");

    let migrator = Migrator::new(
        PassStore::new(store_dir.path(), ".gpg"),
        PlainFileReader {
            root: store_dir.path().to_path_buf(),
        },
    );
    let report = migrator.run(|_| {}).unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.processed, 3);
    assert_eq!(report.summary(), "3/4");
    assert_eq!(report.failed, ["web/broken"]);

    write_records(&out, &report.records).unwrap();
    let rows = read_csv(&out);

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], COLUMNS);
    assert_eq!(
        rows[1],
        [
            "email/personal",
            "",
            "me@example.com",
            "",
            "mail-pass",
            "recovery codes in safe",
            "",
            ""
        ]
    );
    assert_eq!(
        rows[2],
        ["web/github", "", "", "octocat", "gh-pass", "2fa enabled", "", ""]
    );
    assert_eq!(rows[3], ["wifi", "", "", "", "wifi-pass", "", "", ""]);
}

#[test]
fn record_count_matches_readable_entries() {
    let dir = TempDir::new().unwrap();
    for i in 0..10 {
        let content = if i % 3 == 0 {
            "!fail".to_string()
        } else {
            format!("pw-{i}\nuser: u{i}")
        };
        write_entry(dir.path(), &format!("bulk/entry-{i:02}"), &content);
    }

    let migrator = Migrator::new(
        PassStore::new(dir.path(), ".gpg"),
        PlainFileReader {
            root: dir.path().to_path_buf(),
        },
    );
    let report = migrator.run(|_| {}).unwrap();

    // i = 0, 3, 6, 9 fail.
    assert_eq!(report.records.len(), 6);
    assert_eq!(report.summary(), "6/10");
}

#[test]
fn missing_store_aborts_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-store");

    let migrator = Migrator::new(
        PassStore::new(&missing, ".gpg"),
        PlainFileReader { root: missing.clone() },
    );
    assert!(matches!(
        migrator.run(|_| {}),
        Err(MigrateError::StoreNotFound(_))
    ));
}

#[test]
fn rerun_overwrites_previous_export() {
    let store_dir = store_fixture();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("out.csv");

    let migrator = Migrator::new(
        PassStore::new(store_dir.path(), ".gpg"),
        PlainFileReader {
            root: store_dir.path().to_path_buf(),
        },
    );

    let first = migrator.run(|_| {}).unwrap();
    write_records(&out, &first.records).unwrap();

    fs::remove_file(store_dir.path().join("wifi.gpg")).unwrap();
    let second = migrator.run(|_| {}).unwrap();
    write_records(&out, &second.records).unwrap();

    let rows = read_csv(&out);
    assert_eq!(rows.len(), 1 + second.records.len());
    assert!(rows.iter().all(|r| r[0] != "wifi"));
}
