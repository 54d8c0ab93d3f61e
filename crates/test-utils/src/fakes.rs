use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use sasstpl::errors::RenderError;
use sasstpl::fs::FileSystem;
use sasstpl::output::Notifier;
use sasstpl::style::{CssPostProcessor, StyleCompiler};

/// Source text containing this token fails to "compile".
pub const COMPILE_ERROR_TOKEN: &str = "@error";

/// A fake compiler that:
/// - records which sources were compiled
/// - returns the trimmed source text as "CSS"
/// - fails when the source contains [`COMPILE_ERROR_TOKEN`].
#[derive(Debug)]
pub struct FakeCompiler {
    fs: Arc<dyn FileSystem>,
    compiled: Mutex<Vec<PathBuf>>,
}

impl FakeCompiler {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            compiled: Mutex::new(Vec::new()),
        }
    }

    pub fn compiled(&self) -> Vec<PathBuf> {
        self.compiled.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.compiled.lock().unwrap().clear();
    }
}

impl StyleCompiler for FakeCompiler {
    fn compile(&self, source: &Path) -> Result<String> {
        self.compiled.lock().unwrap().push(source.to_path_buf());
        let text = self.fs.read_to_string(source)?;
        if text.contains(COMPILE_ERROR_TOKEN) {
            bail!("{}: syntax error", source.display());
        }
        Ok(text.trim().to_string())
    }
}

/// Post-processor failing on CSS that contains `needle`.
#[derive(Debug, Clone)]
pub struct FailingPostProcessor {
    pub needle: String,
}

impl CssPostProcessor for FailingPostProcessor {
    fn process(&self, css: &str) -> Result<String> {
        if css.contains(&self.needle) {
            bail!("cannot process {:?}", self.needle);
        }
        Ok(css.to_string())
    }
}

/// Notifier that records every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    reloads: Mutex<Vec<PathBuf>>,
    removed: Mutex<Vec<PathBuf>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn reloads(&self) -> Vec<PathBuf> {
        self.reloads.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn reload(&self, path: &Path) {
        self.reloads.lock().unwrap().push(path.to_path_buf());
    }

    fn removed(&self, path: &Path) {
        self.removed.lock().unwrap().push(path.to_path_buf());
    }

    fn failed(&self, error: &RenderError) {
        self.failures.lock().unwrap().push(error.to_string());
    }
}
