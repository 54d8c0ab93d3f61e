// src/config/validate.rs

use tracing::warn;

use crate::config::model::{
    ConfigFile, DEFAULT_BROWSERS, DEFAULT_GLOB, DEFAULT_JS_FILE, DEFAULT_MARKER_END,
    DEFAULT_MARKER_START, PipelineOptions, RawConfigFile, split_comma_list,
};
use crate::errors::{Result, SasstplError};
use crate::output::injector::placeholder_count;
use crate::output::resolver::clean_destination;
use crate::watch::patterns::check_pattern;

/// Apply defaults to a merged raw config and validate the result.
pub fn build_config(raw: RawConfigFile, template: String) -> Result<ConfigFile> {
    let pipeline = PipelineOptions {
        marker_start: raw
            .marker_start
            .unwrap_or_else(|| DEFAULT_MARKER_START.to_string()),
        marker_end: raw
            .marker_end
            .unwrap_or_else(|| DEFAULT_MARKER_END.to_string()),
        glob_patterns: raw.glob.unwrap_or_else(|| split_comma_list(DEFAULT_GLOB)),
        emit_css_file: raw.css_file.unwrap_or(false),
        omit_suffix: raw.wo_suffix.unwrap_or(false),
        code_file_extension: raw
            .js_file
            .unwrap_or_else(|| DEFAULT_JS_FILE.to_string()),
        destination_dir: raw.destination,
        fallback_template: template,
        suppress_notification: raw.hide_reload.unwrap_or(false),
    };

    let browsers = raw
        .browsers
        .unwrap_or_else(|| vec![DEFAULT_BROWSERS.to_string()]);

    validate_pipeline_options(&pipeline)?;

    Ok(ConfigFile::new_unchecked(pipeline, browsers))
}

/// Check the invariants of [`PipelineOptions`].
pub fn validate_pipeline_options(opts: &PipelineOptions) -> Result<()> {
    validate_patterns(opts)?;
    validate_destination(opts)?;
    if !opts.emit_css_file {
        validate_code_file_options(opts)?;
    }
    Ok(())
}

fn validate_patterns(opts: &PipelineOptions) -> Result<()> {
    for pattern in &opts.glob_patterns {
        check_pattern(pattern)?;
    }
    if opts.glob_patterns.is_empty() {
        warn!("no glob patterns configured; nothing will be rendered");
    }
    Ok(())
}

fn validate_destination(opts: &PipelineOptions) -> Result<()> {
    if let Some(dest) = &opts.destination_dir {
        if clean_destination(dest).is_empty() {
            return Err(SasstplError::ConfigError(format!(
                "destination {dest:?} is empty once leading/trailing separators are removed"
            )));
        }
    }
    Ok(())
}

fn validate_code_file_options(opts: &PipelineOptions) -> Result<()> {
    if opts.marker_start.is_empty() {
        return Err(SasstplError::ConfigError(
            "marker start must not be empty when generating code files".to_string(),
        ));
    }
    if opts.marker_end.is_empty() {
        return Err(SasstplError::ConfigError(
            "marker end must not be empty when generating code files".to_string(),
        ));
    }
    if opts.code_file_extension.trim().is_empty() {
        return Err(SasstplError::ConfigError(
            "js file extension must not be empty".to_string(),
        ));
    }
    if opts.fallback_template.is_empty() {
        return Err(SasstplError::ConfigError(
            "fallback template must not be empty when generating code files".to_string(),
        ));
    }

    match placeholder_count(&opts.fallback_template) {
        1 => {}
        0 => warn!("fallback template has no `<% content %>` placeholder; new files cannot be created"),
        n => warn!(count = n, "fallback template has several placeholders; only the first is replaced"),
    }

    Ok(())
}
