// src/types.rs

use std::path::{Path, PathBuf};

/// Base-name prefix marking a dependency-only stylesheet fragment.
pub const FRAGMENT_PREFIX: char = '_';

/// Where the output for one source file lives.
///
/// Derived from a source path plus the pipeline options; never persisted
/// across restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub directory: PathBuf,
    pub base_name: String,
    /// Suffix and extension, e.g. `-styles.css.js`.
    pub extension: String,
}

impl OutputDescriptor {
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }
}

/// True if the file name of `path` starts with the fragment prefix
/// (e.g. `_partial.scss`).
pub fn is_fragment(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(FRAGMENT_PREFIX))
}

/// Source file name without its stylesheet extension.
pub fn source_base_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}
