// src/engine/queue.rs

//! Coalescing of queued events.
//!
//! A `FileChanged` sweep re-renders every tracked file, so several change
//! events waiting back to back produce exactly one sweep. Add/remove events
//! keep their order and are never dropped: they change what a later sweep
//! covers. The one exception is a source that is unlinked and re-created
//! within a batch, which is an in-place save and becomes a change.

use crate::engine::PipelineEvent;

/// Collapse runs of consecutive `FileChanged` events into the first one.
pub fn coalesce_changes(events: Vec<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut out: Vec<PipelineEvent> = Vec::with_capacity(events.len());
    for event in events {
        let redundant = matches!(event, PipelineEvent::FileChanged(_))
            && matches!(out.last(), Some(PipelineEvent::FileChanged(_)));
        if !redundant {
            out.push(event);
        }
    }
    out
}

/// Turn `FileRemoved(p)` followed later by `FileAdded(p)` into a single
/// `FileChanged(p)` at the position of the add.
///
/// Editors that save by writing a new file and renaming it over the old one
/// produce exactly this pair.
pub fn merge_replaced_files(events: Vec<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut out: Vec<Option<PipelineEvent>> = Vec::with_capacity(events.len());
    for event in events {
        if let PipelineEvent::FileAdded(path) = &event {
            let pending = out
                .iter()
                .rposition(|e| matches!(e, Some(PipelineEvent::FileRemoved(p)) if p == path));
            if let Some(idx) = pending {
                out[idx] = None;
                out.push(Some(PipelineEvent::FileChanged(path.clone())));
                continue;
            }
        }
        out.push(Some(event));
    }
    out.into_iter().flatten().collect()
}

pub(crate) fn has_removal(events: &[PipelineEvent]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, PipelineEvent::FileRemoved(_)))
}
