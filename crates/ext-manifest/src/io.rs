//! Locked, atomic manifest I/O

use std::fs;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Write content atomically to `path`.
///
/// Content goes to a uniquely named sibling temp file, held under an
/// exclusive advisory lock while it is written, which is then persisted over
/// the target. Readers never observe a half-written manifest and concurrent
/// writers in one process never share a temp file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let prefix = format!(
        ".{}.",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(".tmp");
    // temp files default to 0600; the manifest is shared with the toolchain
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut temp_file = builder
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    temp_file
        .as_file()
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .unlock()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    // on failure the temp file is removed when the handle drops
    temp_file
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    Ok(())
}

/// Read a text file, mapping failures onto [`Error::Io`].
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/composer.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(read_text(&path).unwrap(), "{}");
    }

    #[test]
    fn write_atomic_replaces_existing_content_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("composer.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(read_text(&path).unwrap(), "second");
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn concurrent_writers_do_not_share_a_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("composer.json");

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    write_atomic(&path, format!("{{\"writer\": {i}}}").as_bytes())
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap().unwrap();
        }

        let content = read_text(&path).unwrap();
        assert!(content.starts_with("{\"writer\": "), "torn write: {content}");
        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["composer.json".to_string()]);
    }

    #[test]
    fn read_text_reports_missing_file_as_io() {
        let temp = TempDir::new().unwrap();
        let err = read_text(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
