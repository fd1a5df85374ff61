//! Temp-file-and-rename writes.
//!
//! Concurrent runs targeting the same path are not coordinated: each
//! rename is atomic, so the last writer wins.

use miller_types::error::{MillerError, MillerResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory that will hold `path`. A bare file name lives in `.`.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Sibling scratch path: `dir/.name.<pid>.tmp`.
pub fn temp_path_for(path: &Path) -> MillerResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        MillerError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    Ok(parent_dir(path).join(format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        std::process::id()
    )))
}

/// Fail unless the directory that will hold `path` exists.
pub fn ensure_parent_dir(path: &Path) -> MillerResult<()> {
    let parent = parent_dir(path);
    if parent.is_dir() {
        return Ok(());
    }
    Err(MillerError::io(
        path,
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("parent directory '{}' does not exist", parent.display()),
        ),
    ))
}

/// Run `write` against a temporary sibling of `path`, then rename it into
/// place. The parent directory must already exist; it is never created.
/// On any failure the temporary file is removed and `path` is untouched.
pub fn write_atomically<F>(path: &Path, write: F) -> MillerResult<()>
where
    F: FnOnce(&Path) -> MillerResult<()>,
{
    ensure_parent_dir(path)?;

    let tmp = temp_path_for(path)?;
    if let Err(e) = write(&tmp) {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }

    let written = match fs::metadata(&tmp) {
        Ok(meta) => meta.len(),
        Err(e) => {
            fs::remove_file(&tmp).ok();
            return Err(MillerError::io(&tmp, e));
        }
    };
    if written == 0 {
        fs::remove_file(&tmp).ok();
        return Err(MillerError::io(
            path,
            io::Error::new(io::ErrorKind::WriteZero, "encoder produced an empty file"),
        ));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        fs::remove_file(&tmp).ok();
        return Err(MillerError::io(path, e));
    }
    log::debug!("Wrote {} bytes to '{}'", written, path.display());
    Ok(())
}
