//! Output file writing
//!
//! Fixture files are either written completely or not at all: bytes go to a
//! temporary file next to the destination, which is then renamed over it.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::FixtureError;

/// Write `data` to `path`, replacing any existing file atomically
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), FixtureError> {
    let io_error = |source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(data).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;

    tracing::info!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glTF").join("outlines.bin");

        write_atomic(&path, &[1, 2, 3, 4]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.bin");
        std::fs::write(&path, vec![0xFF; 64]).unwrap();

        write_atomic(&path, &[7, 7]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![7, 7]);

        // no temp files left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = write_atomic(&blocker.join("out.bin"), &[0]).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
