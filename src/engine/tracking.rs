// src/engine/tracking.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::OutputDescriptor;

/// Last known output location per source file.
///
/// Lets an `unlink` find the output of a source that no longer exists.
/// Owned and mutated only by [`crate::engine::PipelineCore`].
#[derive(Debug, Default, Clone)]
pub struct TrackingState {
    last_outputs: HashMap<PathBuf, OutputDescriptor>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entry for `source`.
    pub fn record(&mut self, source: &Path, descriptor: OutputDescriptor) {
        self.last_outputs.insert(source.to_path_buf(), descriptor);
    }

    pub fn get(&self, source: &Path) -> Option<&OutputDescriptor> {
        self.last_outputs.get(source)
    }

    /// Remove and return the entry for `source`.
    pub fn take(&mut self, source: &Path) -> Option<OutputDescriptor> {
        self.last_outputs.remove(source)
    }

    pub fn len(&self) -> usize {
        self.last_outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_outputs.is_empty()
    }
}
