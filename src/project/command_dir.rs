use std::fs;
use std::path::Path;

use tracing::debug;

use crate::utils::fs::{exists, is_empty};

/// Used whenever nothing on disk suggests another convention.
pub const DEFAULT_COMMAND_DIR: &str = "cmd";

/// Pick the command directory name for the project at (or inside) `abs_path`.
///
/// Returns the path's own name when it already is a command directory, else
/// the first recognised child directory name, else [`DEFAULT_COMMAND_DIR`].
/// Never fails; unreadable paths fall back to the default.
pub fn find_command_dir_name<'a>(abs_path: &Path, command_dirs: &'a [String]) -> &'a str {
    if !exists(abs_path) || is_empty(abs_path) {
        return DEFAULT_COMMAND_DIR;
    }

    if let Some(base) = abs_path.file_name().and_then(|name| name.to_str()) {
        if let Some(dir) = command_dirs.iter().find(|dir| dir.as_str() == base) {
            debug!(path = %abs_path.display(), dir = %dir, "path is already a command directory");
            return dir;
        }
    }

    let mut candidates: Vec<String> = match fs::read_dir(abs_path) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with('c'))
            .collect(),
        Err(_) => return DEFAULT_COMMAND_DIR,
    };
    candidates.sort();

    for candidate in &candidates {
        if let Some(dir) = command_dirs.iter().find(|dir| *dir == candidate) {
            debug!(path = %abs_path.display(), dir = %dir, "found existing command directory");
            return dir;
        }
    }

    DEFAULT_COMMAND_DIR
}
