use std::path::{Path, PathBuf};
use std::sync::Arc;

use sasstpl::config::PipelineOptions;
use sasstpl::engine::{PipelineCore, Renderer};
use sasstpl::fs::FileSystem;
use sasstpl::output::Notifier;
use sasstpl::style::{CssPostProcessor, Passthrough, StyleCompiler};
use sasstpl::watch::{GlobTracker, PatternSet};

use crate::fakes::{FakeCompiler, RecordingNotifier};

/// Template used by tests unless overridden.
pub const TEST_TEMPLATE: &str = "import { css } from 'lit';\n\nexport default css`<% content %>`;\n";

/// Builder for `PipelineOptions` to simplify test setup.
pub struct OptionsBuilder {
    options: PipelineOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: PipelineOptions {
                fallback_template: TEST_TEMPLATE.to_string(),
                ..PipelineOptions::default()
            },
        }
    }

    pub fn markers(mut self, start: &str, end: &str) -> Self {
        self.options.marker_start = start.to_string();
        self.options.marker_end = end.to_string();
        self
    }

    pub fn glob(mut self, pattern: &str) -> Self {
        self.options.glob_patterns.push(pattern.to_string());
        self
    }

    pub fn only_glob(mut self, pattern: &str) -> Self {
        self.options.glob_patterns = vec![pattern.to_string()];
        self
    }

    pub fn no_globs(mut self) -> Self {
        self.options.glob_patterns.clear();
        self
    }

    pub fn css_file(mut self, val: bool) -> Self {
        self.options.emit_css_file = val;
        self
    }

    pub fn wo_suffix(mut self, val: bool) -> Self {
        self.options.omit_suffix = val;
        self
    }

    pub fn js_file(mut self, ext: &str) -> Self {
        self.options.code_file_extension = ext.to_string();
        self
    }

    pub fn destination(mut self, dest: &str) -> Self {
        self.options.destination_dir = Some(dest.to_string());
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.options.fallback_template = template.to_string();
        self
    }

    pub fn hide_reload(mut self, val: bool) -> Self {
        self.options.suppress_notification = val;
        self
    }

    pub fn build(self) -> PipelineOptions {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a test needs to drive a `PipelineCore` over some filesystem.
pub struct PipelineHarness {
    pub root: PathBuf,
    pub fs: Arc<dyn FileSystem>,
    pub compiler: Arc<FakeCompiler>,
    pub notifier: Arc<RecordingNotifier>,
    pub core: PipelineCore,
}

impl PipelineHarness {
    /// Core wired with a [`FakeCompiler`], a passthrough post-processor and a
    /// [`RecordingNotifier`].
    pub fn new(fs: Arc<dyn FileSystem>, root: impl AsRef<Path>, options: PipelineOptions) -> Self {
        Self::with_post_processor(fs, root, options, Arc::new(Passthrough))
    }

    pub fn with_post_processor(
        fs: Arc<dyn FileSystem>,
        root: impl AsRef<Path>,
        options: PipelineOptions,
        post: Arc<dyn CssPostProcessor>,
    ) -> Self {
        let root = root.as_ref().to_path_buf();
        let compiler = Arc::new(FakeCompiler::new(Arc::clone(&fs)));
        let notifier = Arc::new(RecordingNotifier::default());

        let patterns = Arc::new(
            PatternSet::compile(&root, &options.glob_patterns).expect("test globs compile"),
        );
        let renderer = Renderer::new(
            options,
            &root,
            Arc::clone(&fs),
            Arc::clone(&compiler) as Arc<dyn StyleCompiler>,
            post,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        let tracker = GlobTracker::new(Arc::clone(&fs), patterns);

        Self {
            root,
            fs,
            compiler,
            notifier,
            core: PipelineCore::new(renderer, tracker),
        }
    }
}
