// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::core::PipelineCore;
use crate::engine::queue::{coalesce_changes, has_removal, merge_replaced_files};
use crate::engine::PipelineEvent;
use crate::errors::{Error, Result};

/// Async shell around [`PipelineCore`].
///
/// Events are drained from `event_rx` in batches; each batch is handed to
/// the core on a blocking thread and finished before the next batch is read.
/// Sweeps therefore never overlap, and two writes to the same output path
/// can never interleave.
///
/// A batch holding an unlink waits [`REPLACE_GRACE`] for more events, so a
/// save that replaces the source file arrives as one change instead of a
/// removal that would delete the output.
pub struct Runtime {
    core: PipelineCore,
    event_rx: mpsc::Receiver<PipelineEvent>,
    grace: Duration,
}

/// How long an unlink waits for the same path to reappear.
pub const REPLACE_GRACE: Duration = Duration::from_millis(100);

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("grace", &self.grace)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(core: PipelineCore, event_rx: mpsc::Receiver<PipelineEvent>) -> Self {
        Self {
            core,
            event_rx,
            grace: REPLACE_GRACE,
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Main event loop. Returns the core once the channel closes or a
    /// shutdown event arrives.
    pub async fn run(self) -> Result<PipelineCore> {
        let Runtime {
            mut core,
            mut event_rx,
            grace,
        } = self;
        info!("sasstpl watching for changes");

        loop {
            let first = match event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("event channel closed; exiting");
                    break;
                }
            };

            let mut batch = vec![first];
            while let Ok(next) = event_rx.try_recv() {
                batch.push(next);
            }
            if has_removal(&batch) && !grace.is_zero() {
                tokio::time::sleep(grace).await;
                while let Ok(next) = event_rx.try_recv() {
                    batch.push(next);
                }
            }
            let batch = coalesce_changes(merge_replaced_files(batch));
            debug!(?batch, "runtime received events");

            let (returned, keep_running) = tokio::task::spawn_blocking(move || {
                let mut keep_running = true;
                for event in batch {
                    let step = core.step(event);
                    if !step.keep_running {
                        keep_running = false;
                        break;
                    }
                }
                (core, keep_running)
            })
            .await
            .map_err(Error::from)?;
            core = returned;

            if !keep_running {
                info!("shutdown requested; stopping runtime");
                break;
            }
        }

        Ok(core)
    }
}
