// src/output/resolver.rs

//! Output location for a source file.
//!
//! Naming: `<base><suffix><ext>` where suffix is `-styles` (or nothing with
//! `omit_suffix`) and ext is `.css` or `.css.<code_file_extension>`.

use std::path::{Path, PathBuf, is_separator};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::debug;

use crate::config::PipelineOptions;
use crate::errors::RenderError;
use crate::fs::FileSystem;
use crate::types::{OutputDescriptor, source_base_name};
use crate::watch::path_utils::normalize_lexically;

pub const STYLE_SUFFIX: &str = "-styles";

/// Suffix plus extension for the configured output kind.
pub fn output_extension(opts: &PipelineOptions) -> String {
    let suffix = if opts.omit_suffix { "" } else { STYLE_SUFFIX };
    if opts.emit_css_file {
        format!("{suffix}.css")
    } else {
        format!("{suffix}.css.{}", opts.code_file_extension)
    }
}

/// Strip exactly one leading and one trailing path separator.
///
/// `"/out/"`, `"/out"` and `"out"` all clean to `"out"`.
pub fn clean_destination(dest: &str) -> &str {
    let mut cleaned = dest;
    if let Some(c) = cleaned.chars().next() {
        if is_separator(c) {
            cleaned = &cleaned[c.len_utf8()..];
        }
    }
    if let Some(c) = cleaned.chars().next_back() {
        if is_separator(c) {
            cleaned = &cleaned[..cleaned.len() - c.len_utf8()];
        }
    }
    cleaned
}

/// Derives [`OutputDescriptor`]s and prepares destination directories.
#[derive(Debug, Clone)]
pub struct PathResolver {
    fs: Arc<dyn FileSystem>,
    /// Base for relative destinations.
    root: PathBuf,
}

impl PathResolver {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the output location for `source`.
    ///
    /// With a destination configured, the cleaned directory is created (if
    /// needed) as a side effect.
    pub fn resolve(
        &self,
        source: &Path,
        opts: &PipelineOptions,
    ) -> Result<OutputDescriptor, RenderError> {
        let base_name = source_base_name(source).ok_or_else(|| RenderError::Read {
            path: source.to_path_buf(),
            source: anyhow!("source path has no file name"),
        })?;

        let directory = match &opts.destination_dir {
            Some(dest) => self.prepare_destination(dest)?,
            None => match source.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => self.root.clone(),
            },
        };

        Ok(OutputDescriptor {
            directory,
            base_name,
            extension: output_extension(opts),
        })
    }

    /// Like [`resolve`](Self::resolve) but never touches the filesystem.
    ///
    /// Used to locate stale outputs of sources that were never rendered.
    pub fn derive(&self, source: &Path, opts: &PipelineOptions) -> Option<OutputDescriptor> {
        let base_name = source_base_name(source)?;
        let directory = match &opts.destination_dir {
            Some(dest) => self.destination_path(dest),
            None => source.parent()?.to_path_buf(),
        };
        Some(OutputDescriptor {
            directory,
            base_name,
            extension: output_extension(opts),
        })
    }

    /// Absolute cleaned destination directory, without creating it.
    pub fn destination_path(&self, dest: &str) -> PathBuf {
        normalize_lexically(&self.root.join(clean_destination(dest)))
    }

    /// Clean, create and absolutize the destination directory.
    ///
    /// Creation is idempotent: an existing directory is not an error.
    pub fn prepare_destination(&self, dest: &str) -> Result<PathBuf, RenderError> {
        let dir = self.destination_path(dest);
        if !self.fs.is_dir(&dir) {
            debug!(?dir, "creating destination directory");
            self.fs
                .create_dir_all(&dir)
                .map_err(|source| RenderError::InvalidDestination {
                    path: dir.clone(),
                    source,
                })?;
        }
        Ok(dir)
    }
}
