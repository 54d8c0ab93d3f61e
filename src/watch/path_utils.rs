// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(slash_str(rel));
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(slash_str(rel));
        }
    }

    None
}

/// Path for display: relative to `root` when possible, else as given.
pub fn display_path(root: &Path, path: &Path) -> String {
    relative_str(root, path).unwrap_or_else(|| slash_str(path))
}

/// Lossy string form of `path` with forward slashes.
pub fn slash_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root is dropped, so `/a/../../b` becomes `/b`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
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
    out
}
