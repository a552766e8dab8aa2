//! Writes a finished export buffer to its destination file.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::ExportError;

/// Replaces the contents of `path` with `buffer` plus one trailing newline.
///
/// The data goes to a temporary file next to the real destination which is
/// then renamed over it, so a reader sees either the old file or the
/// complete new one. An empty buffer still replaces the file.
///
/// A symlinked `path` keeps pointing at its target, and the target's
/// contents are what get replaced. The replacement carries the permissions
/// of the file it replaces; a new file gets the same permissions
/// [`std::fs::File::create`] would give it.
///
/// # Errors
///
/// Returns [`ExportError::NoParent`] when the destination has no parent
/// directory and [`ExportError::Io`] when creating, writing or renaming the
/// file fails.
pub fn write_export(path: &Path, buffer: &str) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path).map_err(io_err)?;
    let permissions = std::fs::metadata(&target).map_err(io_err)?.permissions();
    let dir = parent_dir(&target)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(buffer.as_bytes()).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    tmp.as_file().set_permissions(permissions).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    tracing::debug!(
        path = %path.display(),
        target = %target.display(),
        bytes = buffer.len() + 1,
        "export written"
    );
    Ok(())
}

/// The regular file that `path` names once symlinks are followed. It is
/// created empty when missing, leaving existing contents alone.
fn resolve_target(path: &Path) -> std::io::Result<PathBuf> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    std::fs::canonicalize(path)
}

/// Directory the temporary file is created in. A bare file name lives in
/// the working directory.
fn parent_dir(path: &Path) -> Result<PathBuf, ExportError> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(ExportError::NoParent {
            path: path.to_path_buf(),
        }),
    }
}
