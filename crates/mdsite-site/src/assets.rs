//! Static asset copying.

use std::fs;
use std::path::Path;

use crate::error::{BuildError, io_error};

/// Recursively copy `source` into `dest`, creating directories as needed.
///
/// Existing files in `dest` are overwritten. Returns the number of files
/// copied. A missing `source` copies nothing.
pub fn copy_static(source: &Path, dest: &Path) -> Result<usize, BuildError> {
    if !source.is_dir() {
        tracing::debug!(path = %source.display(), "No static directory, skipping");
        return Ok(0);
    }
    copy_dir(source, dest)
}

fn copy_dir(source: &Path, dest: &Path) -> Result<usize, BuildError> {
    fs::create_dir_all(dest).map_err(io_error(dest))?;

    let mut entries = fs::read_dir(source)
        .map_err(io_error(source))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(source))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut copied = 0;
    for entry in entries {
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let is_dir = entry.file_type().map_err(io_error(&from))?.is_dir();

        if is_dir {
            copied += copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(io_error(&from))?;
            tracing::debug!(from = %from.display(), to = %to.display(), "Copied static file");
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_copy_static_nested() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(src.path().join("index.css"), "body {}").unwrap();
        fs::create_dir_all(src.path().join("images/icons")).unwrap();
        fs::write(src.path().join("images/tolkien.png"), [0u8, 1, 2]).unwrap();
        fs::write(src.path().join("images/icons/star.svg"), "<svg/>").unwrap();

        let copied = copy_static(src.path(), &dest.path().join("out")).unwrap();

        assert_eq!(copied, 3);
        let out = dest.path().join("out");
        assert_eq!(fs::read_to_string(out.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read(out.join("images/tolkien.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(out.join("images/icons/star.svg").is_file());
    }

    #[test]
    fn test_copy_static_overwrites() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "new").unwrap();
        fs::write(dest.path().join("a.txt"), "old").unwrap();

        copy_static(src.path(), dest.path()).unwrap();

        assert_eq!(fs::read_to_string(dest.path().join("a.txt")).unwrap(), "new");
    }

    #[test]
    fn test_copy_static_missing_source() {
        let dest = tempfile::tempdir().unwrap();
        let missing = dest.path().join("does-not-exist");

        assert_eq!(copy_static(&missing, dest.path()).unwrap(), 0);
    }

    #[test]
    fn test_copy_static_empty_dirs_are_created() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("empty")).unwrap();

        assert_eq!(copy_static(src.path(), dest.path()).unwrap(), 0);
        assert!(dest.path().join("empty").is_dir());
    }
}
