//! Atomic snapshot writes.
//!
//! Files are written to a hidden temporary sibling and renamed over the
//! target, so readers never observe a partially written snapshot.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::error::OutputError;
use crate::model::MockDatabase;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Serializes `db` as indented JSON and writes it atomically to `path`.
///
/// Relative paths resolve against the current directory. The parent
/// directory must already exist.
///
/// # Errors
///
/// Returns [`OutputError::EncodeError`] if serialization fails, or
/// [`OutputError::WriteError`] if the parent directory cannot be opened or
/// the file cannot be written.
pub fn write_snapshot(path: &Utf8Path, db: &MockDatabase) -> Result<(), OutputError> {
    let contents = db.to_json_pretty()?;
    let (parent, file_name) = split_target(path)?;
    let dir =
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| OutputError::WriteError {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })?;

    write_atomic(&dir, Utf8Path::new(file_name), &contents)?;
    debug!(%path, bytes = contents.len(), "wrote snapshot");
    Ok(())
}

fn split_target(path: &Utf8Path) -> Result<(&Utf8Path, &str), OutputError> {
    let file_name = path.file_name().ok_or_else(|| OutputError::WriteError {
        path: path.to_path_buf(),
        message: "output path must name a file".to_owned(),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Ok((parent, file_name))
}

/// Writes contents to a file in `dir` atomically using a temp file and
/// rename.
///
/// `path` must be a single file name relative to `dir`.
pub(crate) fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), OutputError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(OutputError::WriteError {
            path: path.to_path_buf(),
            message: "output path must be a file".to_owned(),
        });
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(dir, &tmp_name, path, contents)?;
    rename_temp_to_target(dir, &tmp_name, file_name, path)?;
    sync_parent_directory(dir);

    Ok(())
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target_path: &Utf8Path,
    contents: &str,
) -> Result<(), OutputError> {
    let tmp_path = target_path.with_file_name(tmp_name);
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| OutputError::WriteError {
            path: tmp_path.clone(),
            message: err.to_string(),
        })?;

    let written = file.write_all(contents.as_bytes()).and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(OutputError::WriteError {
            path: tmp_path,
            message: err.to_string(),
        });
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    target_path: &Utf8Path,
) -> Result<(), OutputError> {
    if let Err(err) = rename_temp_to_target_impl(dir, tmp_name, target_name) {
        drop(dir.remove_file(tmp_name));
        return Err(OutputError::WriteError {
            path: target_path.to_path_buf(),
            message: err.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort; a failed directory sync does not fail the write.
    drop(parent.open(".").and_then(|dir| dir.sync_all()));
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::*;

    fn scratch_dir(label: &str) -> Utf8PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let base = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("utf-8 temp dir");
        let path = base.join(format!("mock-data-{label}-{}-{suffix}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create scratch dir");
        path
    }

    #[test]
    fn write_atomic_replaces_existing_contents() {
        let root = scratch_dir("replace");
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open scratch dir");
        let name = Utf8Path::new("out.json");

        write_atomic(&dir, name, "first").expect("first write");
        write_atomic(&dir, name, "second").expect("second write");

        assert_eq!(dir.read_to_string(name).expect("read back"), "second");
        let leftovers: Vec<_> = dir
            .entries()
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
        std::fs::remove_dir_all(&root).expect("clean up");
    }

    #[rstest]
    #[case("nested/out.json")]
    #[case("../out.json")]
    fn write_atomic_rejects_non_file_paths(#[case] raw: &str) {
        let root = scratch_dir("reject");
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open scratch dir");

        let result = write_atomic(&dir, Utf8Path::new(raw), "{}");

        assert!(matches!(result, Err(OutputError::WriteError { .. })));
        std::fs::remove_dir_all(&root).expect("clean up");
    }

    #[rstest]
    #[case("mock_db.json", ".", "mock_db.json")]
    #[case("out/mock_db.json", "out", "mock_db.json")]
    fn split_target_defaults_to_current_directory(
        #[case] raw: &str,
        #[case] parent: &str,
        #[case] file: &str,
    ) {
        let (actual_parent, actual_file) = split_target(Utf8Path::new(raw)).expect("split");
        assert_eq!(actual_parent, Utf8Path::new(parent));
        assert_eq!(actual_file, file);
    }

    #[test]
    fn write_snapshot_reports_missing_parent() {
        let db = MockDatabase {
            orgs: vec![],
            users: vec![],
            projects: vec![],
            permissions: vec![],
            feature_flags: vec![],
            dashboards: vec![],
            widgets: vec![],
            metrics: vec![],
            metric_samples: vec![],
            alerts: vec![],
            incidents: vec![],
            eval_suites: vec![],
            eval_runs: vec![],
            audit_logs: vec![],
        };
        let path = Utf8Path::new("definitely-missing-dir/mock_db.json");

        let result = write_snapshot(path, &db);

        assert!(matches!(
            result,
            Err(OutputError::WriteError { path: reported, .. }) if reported == "definitely-missing-dir"
        ));
    }
}
