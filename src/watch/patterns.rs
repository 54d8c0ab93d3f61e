// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::watch::path_utils::{normalize_lexically, slash_str};

/// Characters that start the non-literal part of a glob.
const GLOB_META: &[char] = &['*', '?', '[', '{', '\\'];

/// One configured source pattern, anchored at an absolute base directory.
///
/// `./src/**/*.scss` with root `/proj` becomes base `/proj/src` and the
/// absolute glob `/proj/src/**/*.scss`. `*` never crosses a `/`.
#[derive(Clone)]
pub struct SourcePattern {
    raw: String,
    /// Longest literal directory prefix of the pattern.
    base: PathBuf,
    /// How deep below `base` a match can be; `None` for `**`.
    max_depth: Option<usize>,
    matcher: GlobMatcher,
}

impl fmt::Debug for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePattern")
            .field("raw", &self.raw)
            .field("base", &self.base)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl SourcePattern {
    pub fn compile(root: &Path, raw: &str) -> Result<Self, globset::Error> {
        let (mut anchor, rest) = match raw.strip_prefix('/') {
            Some(rest) => (PathBuf::from("/"), rest),
            None => (normalize_lexically(root), raw),
        };

        // Split into literal directory components and the glob tail.
        let mut literal: Vec<&str> = Vec::new();
        let mut tail: Vec<&str> = Vec::new();
        for part in rest.split('/').filter(|p| !p.is_empty() && *p != ".") {
            if !tail.is_empty() || part.contains(GLOB_META) {
                tail.push(part);
            } else if part == ".." {
                if literal.pop().is_none() {
                    anchor.pop();
                }
            } else {
                literal.push(part);
            }
        }
        // A fully literal pattern names a single file.
        if tail.is_empty() {
            if let Some(file) = literal.pop() {
                tail.push(file);
            }
        }

        let mut base = anchor;
        for part in &literal {
            base.push(part);
        }

        let max_depth = if tail.iter().any(|p| p.contains("**")) {
            None
        } else {
            Some(tail.len())
        };

        let base_str = slash_str(&base);
        let glob_str = format!(
            "{}/{}",
            globset::escape(base_str.trim_end_matches('/')),
            tail.join("/")
        );
        let matcher = build_glob(&glob_str)?.compile_matcher();

        Ok(Self {
            raw: raw.to_string(),
            base,
            max_depth,
            matcher,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.is_match(slash_str(path))
    }
}

/// Compiled set of all configured source patterns.
#[derive(Clone)]
pub struct PatternSet {
    patterns: Vec<SourcePattern>,
    set: GlobSet,
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.patterns.iter().map(|p| p.raw())).finish()
    }
}

impl PatternSet {
    /// Compile `patterns` relative to `root`. An empty list is valid and
    /// matches nothing.
    pub fn compile(root: &Path, patterns: &[String]) -> Result<Self, globset::Error> {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut builder = GlobSetBuilder::new();
        for raw in patterns {
            let pattern = SourcePattern::compile(root, raw)?;
            builder.add(pattern.matcher.glob().clone());
            compiled.push(pattern);
        }
        Ok(Self {
            patterns: compiled,
            set: builder.build()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[SourcePattern] {
        &self.patterns
    }

    /// True if an absolute `path` matches any pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.set.is_match(slash_str(path))
    }

    /// True if sources could live under directory `dir`: it contains a
    /// pattern base, or sits below one within the pattern's depth.
    pub fn covers_dir(&self, dir: &Path) -> bool {
        self.patterns.iter().any(|p| {
            if p.base().starts_with(dir) {
                return true;
            }
            match dir.strip_prefix(p.base()) {
                Ok(rel) => p.max_depth().is_none_or(|max| rel.components().count() < max),
                Err(_) => false,
            }
        })
    }
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

/// Check that a raw pattern compiles.
pub fn check_pattern(pattern: &str) -> Result<(), globset::Error> {
    build_glob(pattern).map(|_| ())
}
