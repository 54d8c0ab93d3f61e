// src/engine/mod.rs

//! Orchestration engine for sasstpl.
//!
//! This module ties together:
//! - the per-file render pipeline ([`render`]): compile, post-process,
//!   resolve the output path, inject, write
//! - the output tracking state used to delete stale outputs ([`tracking`])
//! - the watch pipeline state machine reacting to file events ([`core`])
//! - the async shell that feeds events to the core one batch at a time
//!   ([`runtime`])
//!
//! The core is synchronous and only talks to the filesystem through
//! [`crate::fs::FileSystem`], so it can be unit tested without Tokio.

use std::path::PathBuf;

/// Events flowing into the runtime from the watcher and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Contents of a matched source file changed.
    FileChanged(PathBuf),
    /// A file matching the patterns appeared.
    FileAdded(PathBuf),
    /// A file matching the patterns disappeared.
    FileRemoved(PathBuf),
    /// A directory that may hold sources appeared, vanished or moved.
    DirectoryChanged(PathBuf),
    /// The filesystem watcher reported an error.
    WatchError(String),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Lifecycle of the watch pipeline. There is no explicit stopped state;
/// shutdown is external.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Watching,
}

pub mod core;
pub mod queue;
pub mod render;
pub mod runtime;
pub mod tracking;

pub use core::{CoreStep, PipelineCore, SweepReport};
pub use queue::{coalesce_changes, merge_replaced_files};
pub use render::{RenderOutcome, RenderStatus, Renderer};
pub use runtime::{REPLACE_GRACE, Runtime};
pub use tracking::TrackingState;
