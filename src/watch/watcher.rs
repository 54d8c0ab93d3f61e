// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::PipelineEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::event_handler::classify_event;
use crate::watch::patterns::PatternSet;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    roots: Vec<(PathBuf, RecursiveMode)>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Spawn a filesystem watcher over the directories the patterns can match
/// in and forward classified [`PipelineEvent`]s to `runtime_tx`.
///
/// Only changes after this call are reported; existing files are not
/// replayed. Watcher errors are forwarded as [`PipelineEvent::WatchError`]
/// and do not stop the subscription.
pub fn spawn_watcher(
    patterns: Arc<PatternSet>,
    fs: Arc<dyn FileSystem>,
    runtime_tx: mpsc::Sender<PipelineEvent>,
) -> Result<WatcherHandle> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(err) = event_tx.send(res) {
                // We can't log via tracing here easily, so fallback to stderr.
                eprintln!("sasstpl: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )?;

    let roots = watch_roots(&patterns, fs.as_ref());
    for (root, mode) in &roots {
        watcher.watch(root, *mode)?;
        info!(?root, recursive = matches!(mode, RecursiveMode::Recursive), "watching");
    }

    tokio::spawn(async move {
        while let Some(res) = event_rx.recv().await {
            let events = match res {
                Ok(event) => {
                    debug!(?event, "received notify event");
                    classify_event(&event, &patterns, fs.as_ref())
                }
                Err(err) => vec![PipelineEvent::WatchError(err.to_string())],
            };

            for event in events {
                if runtime_tx.send(event).await.is_err() {
                    // Runtime is gone; nothing left to notify.
                    debug!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        warn!("notify event stream ended");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        roots,
    })
}

/// Directories to subscribe to, one per pattern base.
///
/// A base that does not exist yet is replaced by its nearest existing
/// ancestor (watched recursively) so files created later are still seen.
/// Roots already covered by a recursive ancestor are dropped.
pub fn watch_roots(patterns: &PatternSet, fs: &dyn FileSystem) -> Vec<(PathBuf, RecursiveMode)> {
    let mut roots: Vec<(PathBuf, RecursiveMode)> = Vec::new();

    for pattern in patterns.patterns() {
        let mut dir = pattern.base().to_path_buf();
        let mut mode = match pattern.max_depth() {
            Some(depth) if depth <= 1 => RecursiveMode::NonRecursive,
            _ => RecursiveMode::Recursive,
        };
        while !fs.is_dir(&dir) {
            mode = RecursiveMode::Recursive;
            if !dir.pop() {
                break;
            }
        }
        if dir.as_os_str().is_empty() {
            continue;
        }

        if let Some(existing) = roots.iter_mut().find(|(p, _)| *p == dir) {
            if mode == RecursiveMode::Recursive {
                existing.1 = RecursiveMode::Recursive;
            }
        } else {
            roots.push((dir, mode));
        }
    }

    roots.sort_by(|a, b| a.0.cmp(&b.0));
    let mut kept: Vec<(PathBuf, RecursiveMode)> = Vec::new();
    for (dir, mode) in roots {
        let covered = kept
            .iter()
            .any(|(p, m)| *m == RecursiveMode::Recursive && dir.starts_with(p));
        if !covered {
            kept.push((dir, mode));
        }
    }
    kept
}
