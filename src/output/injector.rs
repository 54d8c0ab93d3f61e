// src/output/injector.rs

//! Turns compiled CSS into final output file content.
//!
//! Per render the injector either:
//! - passes the CSS through (`emit_css_file`),
//! - replaces the marker block of an existing output file, or
//! - materializes the fallback template.
//!
//! It never writes; [`crate::output::OutputWriter`] does that.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::{NoExpand, Regex};

use crate::config::PipelineOptions;
use crate::errors::RenderError;
use crate::fs::FileSystem;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<%\s*content\s*%>").expect("placeholder regex is valid"))
}

/// Number of `<% content %>` placeholders in a template.
pub fn placeholder_count(template: &str) -> usize {
    placeholder().find_iter(template).count()
}

/// Replace the first placeholder of `template` with `css`.
pub fn materialize_template(template: &str, css: &str) -> Result<String, RenderError> {
    if !placeholder().is_match(template) {
        return Err(RenderError::TemplateMalformed);
    }
    Ok(placeholder().replacen(template, 1, NoExpand(css)).into_owned())
}

/// Rewrite the marker block of `existing`.
///
/// Everything up to and including the first `marker_start` is kept; the
/// rest of the old file is dropped and replaced by `css`, `marker_end` and a
/// newline. Returns `None` when the start marker is missing.
pub fn replace_marker_block(
    existing: &str,
    css: &str,
    marker_start: &str,
    marker_end: &str,
) -> Option<String> {
    let start = existing.find(marker_start)?;
    let keep = start + marker_start.len();

    let mut out = String::with_capacity(keep + css.len() + marker_end.len() + 1);
    out.push_str(&existing[..keep]);
    out.push_str(css);
    out.push_str(marker_end);
    out.push('\n');
    Some(out)
}

#[derive(Debug, Clone)]
pub struct TemplateInjector {
    fs: Arc<dyn FileSystem>,
}

impl TemplateInjector {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Produce the final content for `output_path`.
    pub fn render(
        &self,
        css: &str,
        output_path: &Path,
        opts: &PipelineOptions,
    ) -> Result<String, RenderError> {
        if opts.emit_css_file {
            return Ok(css.to_string());
        }

        if self.fs.is_file(output_path) {
            let existing =
                self.fs
                    .read_to_string(output_path)
                    .map_err(|source| RenderError::Read {
                        path: output_path.to_path_buf(),
                        source,
                    })?;

            return replace_marker_block(&existing, css, &opts.marker_start, &opts.marker_end)
                .ok_or_else(|| RenderError::MarkerNotFound {
                    path: output_path.to_path_buf(),
                    marker: opts.marker_start.clone(),
                });
        }

        materialize_template(&opts.fallback_template, css)
    }
}
