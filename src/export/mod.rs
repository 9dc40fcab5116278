//! Proton Pass CSV export.
//!
//! Writes classified records as `name,url,email,username,password,note,totp,vault`
//! rows. The file holds plaintext passwords, so its parent directory is
//! created owner-only (`0700`) and the file itself is `0600`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::home_dir;
use crate::errors::{MigrateError, Result};
use crate::record::{Record, COLUMNS};

/// Write `records` to `path`, replacing any existing file.
///
/// The header row is always written, even when `records` is empty.
/// Returns the absolute path that was written.
pub fn write_records(path: &Path, records: &[Record]) -> Result<PathBuf> {
    let path = resolve(path)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            create_private_dir(parent).map_err(|e| MigrateError::output(parent, e))?;
        }
    }

    let file = open_private(&path).map_err(|e| MigrateError::output(&path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(COLUMNS)
        .map_err(|e| MigrateError::output(&path, e))?;

    for record in records {
        writer
            .write_record(record.cells())
            .map_err(|e| MigrateError::output(&path, e))?;
    }

    writer.flush().map_err(|e| MigrateError::output(&path, e))?;

    Ok(path)
}

/// Expand `~` and anchor relative paths at the current directory.
///
/// Works on path components, so non-UTF-8 names pass through untouched.
fn resolve(path: &Path) -> Result<PathBuf> {
    let expanded = match (path.strip_prefix("~"), home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

/// Create `dir` and any missing ancestors, owner-only on Unix.
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)
}

/// Open `path` for writing, truncating it, with `0600` permissions on Unix.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // `mode` only applies on creation; tighten a file left by an earlier run.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::classify;
    use tempfile::TempDir;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![
            classify("a", "pw-a\nuser: alice"),
            classify("b", "pw-b\nbob@example.com"),
            classify("c", "pw-c\nfirst note\nsecond note"),
        ];
        write_records(&path, &records).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], COLUMNS);
        assert_eq!(rows[1], ["a", "", "", "alice", "pw-a", "", "", ""]);
        assert_eq!(rows[2], ["b", "", "bob@example.com", "", "pw-b", "", "", ""]);
        assert_eq!(
            rows[3],
            ["c", "", "", "", "pw-c", "first note | second note", "", ""]
        );
    }

    #[test]
    fn roundtrip_preserves_values_needing_quotes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![
            classify("web/shop, inc", "p,w\"q\nsaid \"hi\", left"),
            classify("plain", "simple"),
        ];
        write_records(&path, &records).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 1 + records.len());
        for (row, record) in rows[1..].iter().zip(&records) {
            let expected: Vec<String> = record.cells().iter().map(|c| c.to_string()).collect();
            assert_eq!(row, &expected);
        }
    }

    #[test]
    fn empty_input_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_records(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,url,email,username,password,note,totp,vault\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is much longer than the new file\n").unwrap();

        write_records(&path, &[Record::new("only", "pw")]).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "only");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");

        let written = write_records(&path, &[Record::new("x", "y")]).unwrap();
        assert!(written.is_absolute());
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_kept_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"out-\xff.csv"));

        let written = write_records(&path, &[Record::new("x", "y")]).unwrap();
        assert_eq!(written, path);
        assert!(path.exists());
        assert_eq!(read_rows(&path)[1][0], "x");
    }

    #[cfg(unix)]
    #[test]
    fn output_directory_and_file_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("export");
        let path = out_dir.join("out.csv");

        write_records(&path, &[Record::new("x", "y")]).unwrap();

        let dir_mode = fs::metadata(&out_dir).unwrap().permissions().mode();
        let file_mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_file_permissions_are_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_records(&path, &[]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn unwritable_target_is_output_failure() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should go.
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let err = write_records(&path, &[]).unwrap_err();
        assert!(matches!(err, MigrateError::OutputWriteFailure { .. }));
    }
}
