use std::fs;
use std::path::Path;

/// True when anything (file, directory, symlink target) lives at `path`.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Directories are empty when they have no entries, files when they have no bytes.
///
/// Unreadable paths count as empty so callers fall back to their defaults.
pub fn is_empty(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return true;
    };
    if meta.is_dir() {
        return fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true);
    }
    meta.len() == 0
}
