// src/style/sass.rs

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::trace;

use super::StyleCompiler;

/// Sass/SCSS compiler backed by `grass`.
///
/// `@import`/`@use` are resolved relative to the source file first, then
/// through the extra load paths.
#[derive(Debug, Clone, Default)]
pub struct SassCompiler {
    load_paths: Vec<PathBuf>,
}

impl SassCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_paths.push(path.into());
        self
    }
}

impl StyleCompiler for SassCompiler {
    fn compile(&self, source: &Path) -> Result<String> {
        let mut options = grass::Options::default()
            .style(grass::OutputStyle::Expanded)
            .quiet(true);
        if let Some(dir) = source.parent() {
            options = options.load_path(dir);
        }
        for path in &self.load_paths {
            options = options.load_path(path);
        }

        trace!(?source, "compiling sass");
        grass::from_path(source, &options).map_err(|err| anyhow!("{err}"))
    }
}
