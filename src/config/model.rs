// src/config/model.rs

use serde::Deserialize;

pub const DEFAULT_MARKER_START: &str = "export default css`";
pub const DEFAULT_MARKER_END: &str = "`;";
pub const DEFAULT_GLOB: &str = "./*.scss,./src/**/*.scss";
pub const DEFAULT_JS_FILE: &str = "js";
pub const DEFAULT_BROWSERS: &str = "defaults";

/// Template shipped with the binary, used when no override is found.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../templates/sass-template.tmpl");

/// Optional settings as read from `.sass-template.toml`.
///
/// Every key is optional; CLI flags are merged on top of this (see
/// [`RawConfigFile::merge_cli`]) before validation.
///
/// ```toml
/// marker_start = "export default css`"
/// marker_end = "`;"
/// glob = ["./*.scss", "./src/**/*.scss"]
/// css_file = false
/// wo_suffix = false
/// js_file = "ts"
/// destination = "generated/styles"
/// hide_reload = false
/// template = "tpls/lit.tmpl"
/// browsers = ["defaults"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub marker_start: Option<String>,

    #[serde(default)]
    pub marker_end: Option<String>,

    /// Glob patterns; the CLI passes them comma-joined.
    #[serde(default)]
    pub glob: Option<Vec<String>>,

    #[serde(default)]
    pub css_file: Option<bool>,

    #[serde(default)]
    pub wo_suffix: Option<bool>,

    #[serde(default)]
    pub js_file: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub hide_reload: Option<bool>,

    /// Path of a fallback template file.
    #[serde(default)]
    pub template: Option<String>,

    /// Browserslist queries used for vendor prefixing.
    #[serde(default)]
    pub browsers: Option<Vec<String>>,
}

/// Immutable per-run options driving the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub marker_start: String,
    pub marker_end: String,
    pub glob_patterns: Vec<String>,
    /// Write plain `.css` instead of a templated code file.
    pub emit_css_file: bool,
    /// Drop the `-styles` suffix.
    pub omit_suffix: bool,
    pub code_file_extension: String,
    pub destination_dir: Option<String>,
    /// Text with one `<% content %>` placeholder.
    pub fallback_template: String,
    pub suppress_notification: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            marker_start: DEFAULT_MARKER_START.to_string(),
            marker_end: DEFAULT_MARKER_END.to_string(),
            glob_patterns: split_comma_list(DEFAULT_GLOB),
            emit_css_file: false,
            omit_suffix: false,
            code_file_extension: DEFAULT_JS_FILE.to_string(),
            destination_dir: None,
            fallback_template: BUNDLED_TEMPLATE.to_string(),
            suppress_notification: false,
        }
    }
}

/// Validated configuration for one `sasstpl` run.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub pipeline: PipelineOptions,
    /// Browserslist queries for the prefixer.
    pub browsers: Vec<String>,
}

impl ConfigFile {
    /// Construct without validation. Prefer [`crate::config::build_config`].
    pub fn new_unchecked(pipeline: PipelineOptions, browsers: Vec<String>) -> Self {
        Self { pipeline, browsers }
    }
}

/// Split a comma-joined list, dropping empty entries.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
