// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{BUNDLED_TEMPLATE, ConfigFile, RawConfigFile, split_comma_list};
use crate::config::validate::build_config;
use crate::errors::{Result, SasstplError};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".sass-template.toml";

/// Template override picked up from the working directory.
pub const DEFAULT_TEMPLATE_FILE: &str = ".sass-template.tmpl";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        SasstplError::ConfigError(format!("reading config file {:?}: {e}", path))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Build the validated configuration for a run.
///
/// Layers, highest priority first: CLI flags, the config file (explicit
/// `--config`, or `.sass-template.toml` in `cwd` when present), built-in
/// defaults. The fallback template is loaded here as well.
pub fn load_and_validate(args: &CliArgs, cwd: &Path) -> Result<ConfigFile> {
    let file_cfg = match &args.config {
        Some(path) => load_from_path(cwd.join(path))?,
        None => {
            let path = cwd.join(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                debug!(?path, "using config file from working directory");
                load_from_path(&path)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    let raw = file_cfg.merge_cli(args);
    let template = load_template(raw.template.as_deref(), cwd)?;
    build_config(raw, template)
}

/// Resolve the fallback template text.
///
/// An explicitly configured path must exist. Otherwise a
/// `.sass-template.tmpl` in `cwd` wins over the bundled template.
pub fn load_template(explicit: Option<&str>, cwd: &Path) -> Result<String> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        return read_template(&path);
    }

    let local = cwd.join(DEFAULT_TEMPLATE_FILE);
    if local.is_file() {
        debug!(path = ?local, "using template override from working directory");
        return read_template(&local);
    }

    Ok(BUNDLED_TEMPLATE.to_string())
}

fn read_template(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SasstplError::ConfigError(format!("reading template file {:?}: {e}", path))
    })
}

impl RawConfigFile {
    /// Overlay CLI flags on top of file values.
    ///
    /// Boolean flags can only switch a setting on; a `true` in the config
    /// file cannot be turned off from the command line.
    pub fn merge_cli(mut self, args: &CliArgs) -> Self {
        if let Some(s) = &args.marker_start {
            self.marker_start = Some(s.clone());
        }
        if let Some(s) = &args.marker_end {
            self.marker_end = Some(s.clone());
        }
        if let Some(s) = &args.custom_glob {
            self.glob = Some(split_comma_list(s));
        }
        if args.css_file {
            self.css_file = Some(true);
        }
        if args.wo_suffix {
            self.wo_suffix = Some(true);
        }
        if let Some(s) = &args.js_file {
            self.js_file = Some(s.clone());
        }
        if let Some(s) = &args.destination {
            self.destination = Some(s.clone());
        }
        if args.hide_reload {
            self.hide_reload = Some(true);
        }
        if let Some(s) = &args.template {
            self.template = Some(s.clone());
        }
        if let Some(s) = &args.browsers {
            self.browsers = Some(split_comma_list(s));
        }
        self
    }
}
