// src/engine/render.rs

//! The per-file render pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::PipelineOptions;
use crate::errors::RenderError;
use crate::fs::FileSystem;
use crate::output::{Notifier, OutputWriter, PathResolver, TemplateInjector};
use crate::style::{CssPostProcessor, StyleCompiler};
use crate::types::{OutputDescriptor, is_fragment};

/// What happened to one source file in a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    /// Output written to this path.
    Written(PathBuf),
    /// `_`-prefixed fragment; never rendered on its own.
    SkippedFragment,
}

/// Result of rendering one source file.
///
/// `descriptor` is set whenever the output location was computed, even if a
/// later step (inject or write) failed.
#[derive(Debug)]
pub struct RenderOutcome {
    pub source: PathBuf,
    pub descriptor: Option<OutputDescriptor>,
    pub result: Result<RenderStatus, RenderError>,
}

/// Runs compile, post-process, path resolution, injection and write for a
/// single source file.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: Arc<PipelineOptions>,
    compiler: Arc<dyn StyleCompiler>,
    post_processor: Arc<dyn CssPostProcessor>,
    resolver: PathResolver,
    injector: TemplateInjector,
    writer: OutputWriter,
}

impl Renderer {
    pub fn new(
        options: PipelineOptions,
        root: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        compiler: Arc<dyn StyleCompiler>,
        post_processor: Arc<dyn CssPostProcessor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            options: Arc::new(options),
            compiler,
            post_processor,
            resolver: PathResolver::new(Arc::clone(&fs), root),
            injector: TemplateInjector::new(Arc::clone(&fs)),
            writer: OutputWriter::new(fs, notifier),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn writer(&self) -> &OutputWriter {
        &self.writer
    }

    /// Render one source file. Never panics or propagates: every failure is
    /// captured in the returned outcome.
    pub fn render(&self, source: &Path) -> RenderOutcome {
        if is_fragment(source) {
            trace!(?source, "skipping fragment");
            return RenderOutcome {
                source: source.to_path_buf(),
                descriptor: None,
                result: Ok(RenderStatus::SkippedFragment),
            };
        }

        let mut descriptor = None;
        let result = self.render_inner(source, &mut descriptor);
        RenderOutcome {
            source: source.to_path_buf(),
            descriptor,
            result,
        }
    }

    fn render_inner(
        &self,
        source: &Path,
        descriptor_out: &mut Option<OutputDescriptor>,
    ) -> Result<RenderStatus, RenderError> {
        let opts = self.options.as_ref();

        let css = self
            .compiler
            .compile(source)
            .map_err(|err| RenderError::Compile {
                path: source.to_path_buf(),
                message: format!("{err:#}"),
            })?;

        let css = self
            .post_processor
            .process(&css)
            .map_err(|err| RenderError::PostProcess {
                path: source.to_path_buf(),
                message: format!("{err:#}"),
            })?;

        let descriptor = self.resolver.resolve(source, opts)?;
        let output_path = descriptor.path();
        *descriptor_out = Some(descriptor);

        let content = self.injector.render(&css, &output_path, opts)?;
        self.writer
            .write(&output_path, &content, opts.suppress_notification)?;

        debug!(?source, output = ?output_path, "rendered");
        Ok(RenderStatus::Written(output_path))
    }
}
