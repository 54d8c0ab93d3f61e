// src/engine/core.rs

//! Watch pipeline state machine.
//!
//! `PipelineCore` owns the glob tracker, the renderer and the output
//! tracking state. It consumes one [`PipelineEvent`] at a time:
//!
//! - `FileChanged`: re-render every tracked file (stylesheets import
//!   partials and no dependency graph is kept, so any change rebuilds all).
//! - `FileAdded`: re-resolve the glob set; nothing is rendered.
//! - `FileRemoved`: re-resolve the glob set and delete the removed
//!   source's last output. If the source is back by then it was replaced
//!   in place, and the event is handled like a change.
//! - `DirectoryChanged`: re-resolve the glob set and delete the outputs of
//!   tracked sources that vanished with the directory.
//! - `WatchError`: reported, the session goes on.
//!
//! All per-file failures are caught here; none of them ends the session.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace, warn};

use crate::engine::render::{RenderOutcome, RenderStatus, Renderer};
use crate::engine::tracking::TrackingState;
use crate::engine::{Phase, PipelineEvent};
use crate::types::is_fragment;
use crate::watch::GlobTracker;

/// Summary of one sweep over the tracked files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Output paths written, in source order.
    pub written: Vec<PathBuf>,
    /// Fragments skipped.
    pub skipped: usize,
    /// Sources whose render failed.
    pub failed: Vec<PathBuf>,
}

impl SweepReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Decision returned by the core after handling a single `PipelineEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Present if the event caused a sweep.
    pub sweep: Option<SweepReport>,
    /// Outputs deleted because their sources went away. Outputs that were
    /// already absent are not listed.
    pub removed: Vec<PathBuf>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn idle() -> Self {
        Self {
            sweep: None,
            removed: Vec::new(),
            keep_running: true,
        }
    }
}

#[derive(Debug)]
pub struct PipelineCore {
    phase: Phase,
    renderer: Renderer,
    tracker: GlobTracker,
    tracking: TrackingState,
}

impl PipelineCore {
    pub fn new(renderer: Renderer, tracker: GlobTracker) -> Self {
        Self {
            phase: Phase::Initializing,
            renderer,
            tracker,
            tracking: TrackingState::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tracked_files(&self) -> impl Iterator<Item = &Path> {
        self.tracker.files().iter().map(PathBuf::as_path)
    }

    pub fn tracking(&self) -> &TrackingState {
        &self.tracking
    }

    /// Resolve the glob once and render every matched file.
    ///
    /// An empty match set is fine: the session still starts so files
    /// created later are picked up.
    pub fn initialize(&mut self) -> SweepReport {
        let count = self.tracker.refresh().len();
        if count == 0 {
            warn!(patterns = ?self.tracker.patterns(), "no source files matched yet");
        } else {
            info!(count, "initial sweep");
        }

        let report = self.sweep();
        self.phase = Phase::Watching;
        report
    }

    /// Handle a single event.
    pub fn step(&mut self, event: PipelineEvent) -> CoreStep {
        match event {
            PipelineEvent::FileChanged(path) => {
                debug!(?path, "change detected; rebuilding all tracked files");
                CoreStep {
                    sweep: Some(self.sweep()),
                    ..CoreStep::idle()
                }
            }
            PipelineEvent::FileAdded(path) => {
                debug!(?path, "file added; refreshing glob set");
                self.tracker.refresh();
                CoreStep::idle()
            }
            PipelineEvent::FileRemoved(path) => {
                debug!(?path, "file removed; refreshing glob set");
                self.tracker.refresh();
                if self.tracker.is_tracked(&path) {
                    debug!(?path, "source replaced in place; rebuilding");
                    return CoreStep {
                        sweep: Some(self.sweep()),
                        ..CoreStep::idle()
                    };
                }
                CoreStep {
                    removed: self.remove_output_of(&path).into_iter().collect(),
                    ..CoreStep::idle()
                }
            }
            PipelineEvent::DirectoryChanged(dir) => {
                if !self.tracker.affects(&dir) {
                    trace!(?dir, "directory event with no tracked sources");
                    return CoreStep::idle();
                }
                debug!(?dir, "directory changed; refreshing glob set");
                let before = self.tracker.tracked_under(&dir);
                self.tracker.refresh();

                let mut removed = Vec::new();
                for source in before {
                    if self.tracker.is_tracked(&source) {
                        continue;
                    }
                    removed.extend(self.remove_output_of(&source));
                }
                CoreStep {
                    removed,
                    ..CoreStep::idle()
                }
            }
            PipelineEvent::WatchError(message) => {
                error!(%message, "watcher error");
                CoreStep::idle()
            }
            PipelineEvent::ShutdownRequested => CoreStep {
                keep_running: false,
                ..CoreStep::idle()
            },
        }
    }

    /// Render every currently tracked file.
    pub fn sweep(&mut self) -> SweepReport {
        let mut report = SweepReport::default();
        let sources: Vec<PathBuf> = self.tracker.files().iter().cloned().collect();

        for source in sources {
            let outcome = self.renderer.render(&source);
            self.absorb(outcome, &mut report);
        }

        debug!(
            written = report.written.len(),
            skipped = report.skipped,
            failed = report.failed.len(),
            "sweep finished"
        );
        report
    }

    fn absorb(&mut self, outcome: RenderOutcome, report: &mut SweepReport) {
        let RenderOutcome {
            source,
            descriptor,
            result,
        } = outcome;

        if let Some(descriptor) = descriptor {
            self.tracking.record(&source, descriptor);
        }

        match result {
            Ok(RenderStatus::Written(path)) => report.written.push(path),
            Ok(RenderStatus::SkippedFragment) => report.skipped += 1,
            Err(err) => {
                error!(?source, error = %err, "render failed");
                self.renderer.writer().notifier().failed(&err);
                report.failed.push(source);
            }
        }
    }

    /// Delete the output last written for `source`, returning its path if a
    /// file was actually removed.
    ///
    /// Falls back to deriving the path when `source` was never rendered in
    /// this session. Fragments have no output.
    fn remove_output_of(&mut self, source: &Path) -> Option<PathBuf> {
        if is_fragment(source) {
            return None;
        }

        let descriptor = self.tracking.take(source).or_else(|| {
            self.renderer
                .resolver()
                .derive(source, self.renderer.options())
        })?;
        let output = descriptor.path();

        match self.renderer.writer().remove(&output) {
            Ok(true) => Some(output),
            Ok(false) => None,
            Err(err) => {
                warn!(?source, error = %err, "could not remove stale output");
                self.renderer.writer().notifier().failed(&err);
                None
            }
        }
    }
}
