use crate::core::errors::{MigrateError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read a whole target file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MigrateError::from_io(e, path))
}

/// Follow symlinks so the rename lands on the real file, not the link.
/// A target that does not exist yet is written as given.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Replace `path` with `content`.
///
/// The text goes to a temporary file next to the target first, which is then
/// renamed over it; a crash mid-write leaves the original intact. The target's
/// permissions are carried over to the replacement. When `path` is a symlink
/// the file it points to is replaced and the link itself is kept.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| MigrateError::from_io(e, path))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| MigrateError::from_io(e, path))?;

    if let Ok(metadata) = fs::metadata(&target) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| MigrateError::from_io(e, path))?;
    }

    temp.persist(&target)
        .map_err(|e| MigrateError::from_io(e.error, path))?;
    Ok(())
}
