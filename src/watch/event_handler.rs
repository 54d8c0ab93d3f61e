// src/watch/event_handler.rs

//! Translation of raw `notify` events into pipeline events.

use std::path::Path;

use notify::event::{CreateKind, MetadataKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use tracing::trace;

use crate::engine::PipelineEvent;
use crate::fs::FileSystem;
use crate::watch::patterns::PatternSet;

/// Classify one notify event.
///
/// Only paths matching `patterns` produce file events. A rename becomes an
/// unlink of the old path followed by an add of the new one. Directories
/// that can hold sources produce a single `DirectoryChanged`, since a
/// moved or deleted tree is often reported as one folder event.
pub fn classify_event(
    event: &Event,
    patterns: &PatternSet,
    fs: &dyn FileSystem,
) -> Vec<PipelineEvent> {
    let mut out = Vec::new();

    match &event.kind {
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
            for path in &event.paths {
                push_directory(&mut out, path, patterns);
            }
        }
        EventKind::Create(_) => {
            for path in &event.paths {
                push_added(&mut out, path, patterns, fs);
            }
        }
        EventKind::Remove(RemoveKind::File) => {
            for path in &event.paths {
                push_removed(&mut out, path, patterns, false);
            }
        }
        EventKind::Remove(_) => {
            for path in &event.paths {
                push_removed(&mut out, path, patterns, true);
            }
        }
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => {
                for path in &event.paths {
                    push_removed(&mut out, path, patterns, true);
                }
            }
            RenameMode::To => {
                for path in &event.paths {
                    push_added(&mut out, path, patterns, fs);
                }
            }
            RenameMode::Both => {
                if let [from, to, ..] = event.paths.as_slice() {
                    push_removed(&mut out, from, patterns, true);
                    push_added(&mut out, to, patterns, fs);
                }
            }
            RenameMode::Any | RenameMode::Other => {
                // Direction unknown; decide by whether the path still exists.
                for path in &event.paths {
                    if fs.exists(path) {
                        push_added(&mut out, path, patterns, fs);
                    } else {
                        push_removed(&mut out, path, patterns, true);
                    }
                }
            }
        },
        EventKind::Modify(ModifyKind::Metadata(kind))
            if !matches!(kind, MetadataKind::Any | MetadataKind::WriteTime) => {}
        EventKind::Modify(_) => {
            for path in &event.paths {
                if patterns.matches(path) && !fs.is_dir(path) {
                    out.push(PipelineEvent::FileChanged(path.clone()));
                }
            }
        }
        EventKind::Access(_) | EventKind::Any | EventKind::Other => {}
    }

    if !out.is_empty() {
        trace!(kind = ?event.kind, events = ?out, "classified notify event");
    }
    out
}

fn push_added(out: &mut Vec<PipelineEvent>, path: &Path, patterns: &PatternSet, fs: &dyn FileSystem) {
    if fs.is_dir(path) {
        push_directory(out, path, patterns);
    } else if patterns.matches(path) {
        out.push(PipelineEvent::FileAdded(path.to_path_buf()));
    }
}

/// The path is gone, so whether it was a directory is unknown unless the
/// event said so; `maybe_dir` lets the core decide by what it tracked.
fn push_removed(out: &mut Vec<PipelineEvent>, path: &Path, patterns: &PatternSet, maybe_dir: bool) {
    if patterns.matches(path) {
        out.push(PipelineEvent::FileRemoved(path.to_path_buf()));
    } else if maybe_dir {
        push_directory(out, path, patterns);
    }
}

fn push_directory(out: &mut Vec<PipelineEvent>, path: &Path, patterns: &PatternSet) {
    if patterns.covers_dir(path) {
        out.push(PipelineEvent::DirectoryChanged(path.to_path_buf()));
    }
}
