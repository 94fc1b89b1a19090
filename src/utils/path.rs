//! Path normalization utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Recursively copy a directory tree.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("creating {}", dst.display()))?;
    let mut copied = 0;
    for item in fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let item = item?;
        let target = dst.join(item.file_name());
        if item.file_type()?.is_dir() {
            copied += copy_dir(&item.path(), &target)?;
        } else {
            fs::copy(item.path(), &target)
                .with_context(|| format!("copying {}", item.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_absolute_missing_path() {
        let path = Path::new("/definitely/not/here/pildoras");
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_copy_dir_nested() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("images");
        fs::create_dir_all(src.join("2024")).unwrap();
        fs::write(src.join("a.png"), b"a").unwrap();
        fs::write(src.join("2024/b.png"), b"b").unwrap();

        let dst = tmp.path().join("out/images");
        assert_eq!(copy_dir(&src, &dst).unwrap(), 2);
        assert!(dst.join("2024/b.png").is_file());
    }
}
