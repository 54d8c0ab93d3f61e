// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every pipeline option is optional here; unset flags fall back to the
//! config file and then to built-in defaults (see [`crate::config::loader`]).

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sasstpl`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "sasstpl",
    version,
    about = "Compile Sass files and inject the CSS into template files on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Start marker; compiled CSS is injected right after it.
    #[arg(short = 's', long, value_name = "STRING")]
    pub marker_start: Option<String>,

    /// End marker appended after the injected CSS.
    #[arg(short = 'e', long, value_name = "STRING")]
    pub marker_end: Option<String>,

    /// Comma-separated glob patterns of Sass sources to watch.
    #[arg(short = 'g', long, value_name = "GLOBS")]
    pub custom_glob: Option<String>,

    /// Generate a plain CSS file instead of using the template.
    #[arg(short = 'f', long)]
    pub css_file: bool,

    /// Drop the `-styles` suffix from output file names.
    #[arg(short = 'w', long)]
    pub wo_suffix: bool,

    /// Extension of the generated code file (`<name>-styles.css.<ext>`).
    #[arg(short = 'j', long, value_name = "EXT")]
    pub js_file: Option<String>,

    /// Directory all output files are written to.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub destination: Option<String>,

    /// Do not print a reload line after each written file.
    #[arg(long)]
    pub hide_reload: bool,

    /// Fallback template file used when an output file does not exist yet.
    ///
    /// Default: `.sass-template.tmpl` in the working directory if present,
    /// otherwise the bundled template.
    #[arg(long, value_name = "PATH")]
    pub template: Option<String>,

    /// Path to an optional TOML config file.
    ///
    /// Default: `.sass-template.toml` in the working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Browserslist query for vendor prefixing (comma-separated).
    #[arg(long, value_name = "QUERY")]
    pub browsers: Option<String>,

    /// Render every matched file once and exit, no watching.
    #[arg(long)]
    pub once: bool,

    /// Print options, matched files and output paths, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SASSTPL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
