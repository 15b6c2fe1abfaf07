//! Static asset copying.
//!
//! Copies the static directory verbatim into the output root. Assets are an
//! optional collaborator: the builder treats failures here as warnings, not
//! build aborts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset copy errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copy all files under `source_dir` into `dest_dir`, preserving structure
/// and skipping hidden entries. Returns the number of files copied; a
/// missing source directory copies nothing.
pub fn copy_dir(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.exists() {
        debug!(dir = %source_dir.display(), "static directory does not exist, skipping");
        return Ok(0);
    }

    let mut count = 0;
    copy_dir_inner(source_dir, source_dir, dest_dir, &mut count)?;

    info!(count, "static assets copied");
    Ok(count)
}

fn copy_dir_inner(
    base_dir: &Path,
    current_dir: &Path,
    dest_base: &Path,
    count: &mut usize,
) -> Result<()> {
    for entry in fs::read_dir(current_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'))
        {
            continue;
        }

        if path.is_dir() {
            copy_dir_inner(base_dir, &path, dest_base, count)?;
        } else if path.is_file() {
            let relative = path
                .strip_prefix(base_dir)
                .map_err(|_| AssetError::InvalidPath(path.clone()))?;
            let dest = dest_base.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&path, &dest)?;
            *count += 1;

            debug!(src = %path.display(), dest = %dest.display(), "copied asset");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_copy_dir() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join("style.css"), "body {}").unwrap();
        fs::create_dir(source.path().join("images")).unwrap();
        fs::write(source.path().join("images/logo.svg"), "<svg/>").unwrap();

        let count = copy_dir(source.path(), dest.path()).unwrap();

        assert_eq!(count, 2);
        assert!(dest.path().join("style.css").exists());
        assert!(dest.path().join("images/logo.svg").exists());
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join(".hidden"), "secret").unwrap();
        fs::write(source.path().join("visible.txt"), "hello").unwrap();

        let count = copy_dir(source.path(), dest.path()).unwrap();

        assert_eq!(count, 1);
        assert!(!dest.path().join(".hidden").exists());
        assert!(dest.path().join("visible.txt").exists());
    }

    #[test]
    fn test_missing_source_copies_nothing() {
        let dest = TempDir::new().unwrap();
        let count = copy_dir(Path::new("/nonexistent/static"), dest.path()).unwrap();
        assert_eq!(count, 0);
    }
}
