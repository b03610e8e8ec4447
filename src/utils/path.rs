use std::path::{Component, Path, PathBuf};

/// Lexically resolve `.` and `..` without touching the filesystem.
///
/// `..` directly under the root stays at the root; leading `..` of a relative
/// path is kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// `path` with prefix and root dropped, then cleaned. Never absolute.
pub fn clean_relative(path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::Prefix(_) | Component::RootDir))
        .collect();
    clean_path(&relative)
}

/// Forward-slash form of a relative path.
///
/// `None` when it climbs out through `..`; `.` for an empty path.
pub fn to_slash(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}
