// src/output/writer.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::RenderError;
use crate::fs::FileSystem;
use crate::output::console::Notifier;

/// Writes rendered output and removes stale output files.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    fs: Arc<dyn FileSystem>,
    notifier: Arc<dyn Notifier>,
}

impl OutputWriter {
    pub fn new(fs: Arc<dyn FileSystem>, notifier: Arc<dyn Notifier>) -> Self {
        Self { fs, notifier }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Replace `path` with `content`, then emit a reload line unless
    /// `suppress_notification` is set.
    pub fn write(
        &self,
        path: &Path,
        content: &str,
        suppress_notification: bool,
    ) -> Result<(), RenderError> {
        self.fs
            .write(path, content.as_bytes())
            .map_err(|source| RenderError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(?path, bytes = content.len(), "output written");
        if !suppress_notification {
            self.notifier.reload(path);
        }
        Ok(())
    }

    /// Delete `path` if present and report whether it was. An already
    /// missing file is not an error.
    pub fn remove(&self, path: &Path) -> Result<bool, RenderError> {
        let removed = self
            .fs
            .remove_file(path)
            .map_err(|source| RenderError::DeleteFailure {
                path: path.to_path_buf(),
                source,
            })?;

        if removed {
            info!(?path, "removed output of deleted source");
            self.notifier.removed(path);
        } else {
            debug!(?path, "output already absent");
        }
        Ok(removed)
    }
}
