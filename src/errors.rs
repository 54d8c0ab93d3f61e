// src/errors.rs

//! Crate-wide error types.
//!
//! [`SasstplError`] covers setup failures (config, watcher, destination).
//! [`RenderError`] is the per-file taxonomy: it is always caught at file
//! granularity by the pipeline and never ends a watch session.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SasstplError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobError(#[from] globset::Error),

    #[error("File watcher error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure while rendering a single source file.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to compile {path:?}: {message}")]
    Compile { path: PathBuf, message: String },

    #[error("failed to post-process CSS of {path:?}: {message}")]
    PostProcess { path: PathBuf, message: String },

    #[error("marker start {marker:?} not found in {path:?}")]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("fallback template has no `<% content %>` placeholder")]
    TemplateMalformed,

    #[error("invalid destination {path:?}: {source}")]
    InvalidDestination {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to remove {path:?}: {source}")]
    DeleteFailure {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SasstplError>;
