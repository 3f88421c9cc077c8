//! Filesystem helpers for installing a bundled database into a writable
//! location.

use std::io;
use std::path::{Path, PathBuf};

/// Creates `dir` and any missing parents.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Copies `source` into `target_dir`, keeping its file name, unless a file
/// with that name is already there. Returns the target file path.
///
/// This installs once; it never refreshes an existing copy.
pub fn install_database(source: &Path, target_dir: &Path) -> io::Result<PathBuf> {
    ensure_directory(target_dir)?;

    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("source path has no file name: {}", source.display()),
        )
    })?;
    let target = target_dir.join(file_name);

    if !target.exists() {
        std::fs::copy(source, &target)?;
    }
    Ok(target)
}
