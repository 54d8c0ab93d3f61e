// src/watch/tracker.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::watch::patterns::{PatternSet, SourcePattern};

/// Resolves the configured patterns to the current set of source files.
///
/// The set is sorted and deduplicated, so repeated resolutions against an
/// unchanged filesystem are identical. Re-resolution is always a full walk.
#[derive(Debug, Clone)]
pub struct GlobTracker {
    fs: Arc<dyn FileSystem>,
    patterns: Arc<PatternSet>,
    files: BTreeSet<PathBuf>,
}

impl GlobTracker {
    pub fn new(fs: Arc<dyn FileSystem>, patterns: Arc<PatternSet>) -> Self {
        Self {
            fs,
            patterns,
            files: BTreeSet::new(),
        }
    }

    pub fn patterns(&self) -> &Arc<PatternSet> {
        &self.patterns
    }

    /// Files found by the last [`refresh`](Self::refresh).
    pub fn files(&self) -> &BTreeSet<PathBuf> {
        &self.files
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Tracked files below `dir`.
    pub fn tracked_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| f.starts_with(dir) && f.as_path() != dir)
            .cloned()
            .collect()
    }

    /// Whether a rescan for `dir` can change anything: it is a directory
    /// now, or tracked files used to live under it.
    pub fn affects(&self, dir: &Path) -> bool {
        self.fs.is_dir(dir) || !self.tracked_under(dir).is_empty()
    }

    /// Re-resolve the patterns and replace the tracked set.
    pub fn refresh(&mut self) -> &BTreeSet<PathBuf> {
        self.files = self.resolve();
        debug!(count = self.files.len(), "glob set refreshed");
        &self.files
    }

    /// Walk the filesystem and collect every file matching a pattern.
    ///
    /// Missing base directories and unreadable subdirectories are skipped;
    /// an empty result is never an error.
    pub fn resolve(&self) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        for pattern in self.patterns.patterns() {
            collect_pattern_matches(self.fs.as_ref(), pattern, &mut files);
        }
        files
    }
}

fn collect_pattern_matches(fs: &dyn FileSystem, pattern: &SourcePattern, out: &mut BTreeSet<PathBuf>) {
    let base = pattern.base();
    if !fs.is_dir(base) {
        debug!(pattern = pattern.raw(), ?base, "pattern base does not exist");
        return;
    }

    let mut stack: Vec<(PathBuf, usize)> = vec![(base.to_path_buf(), 0)];

    while let Some((dir, depth)) = stack.pop() {
        let entries = match fs.read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(?dir, error = %err, "skipping unreadable directory");
                continue;
            }
        };

        let child_depth = depth + 1;
        for path in entries {
            if fs.is_dir(&path) {
                // A linked directory can point back at an ancestor.
                if fs.is_symlink(&path) {
                    debug!(?path, "not following symlinked directory");
                    continue;
                }
                let descend = pattern.max_depth().is_none_or(|max| child_depth < max);
                if descend && !is_hidden(&path) {
                    stack.push((path, child_depth));
                }
            } else if fs.is_file(&path) && pattern.matches(&path) {
                out.insert(path);
            }
        }
    }
}

/// Dot-directories (`.git`, `.cache`, ...) are not searched, like glob
/// implementations that skip dotfiles by default.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
