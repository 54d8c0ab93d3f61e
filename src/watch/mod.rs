// src/watch/mod.rs

//! Source file discovery and change detection.
//!
//! This module is responsible for:
//! - Compiling the configured glob patterns into absolute matchers.
//! - Resolving them to the current set of source files ([`GlobTracker`]).
//! - Wiring up a cross-platform filesystem watcher (`notify`) and turning
//!   its events into [`crate::engine::PipelineEvent`]s.
//!
//! It does **not** compile or write anything.

pub mod event_handler;
pub mod path_utils;
pub mod patterns;
pub mod tracker;
pub mod watcher;

pub use event_handler::classify_event;
pub use patterns::{PatternSet, SourcePattern};
pub use tracker::GlobTracker;
pub use watcher::{spawn_watcher, watch_roots, WatcherHandle};
