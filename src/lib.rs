// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod output;
pub mod style;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile};
use crate::engine::{PipelineCore, PipelineEvent, Renderer, Runtime, SweepReport};
use crate::errors::{Error, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::output::ConsoleNotifier;
use crate::style::{Autoprefixer, SassCompiler};
use crate::types::is_fragment;
use crate::watch::path_utils::display_path;
use crate::watch::{spawn_watcher, GlobTracker, PatternSet};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Watch session ended or every file rendered.
    Completed,
    /// `--once` run in which at least one file failed to render.
    RenderFailures,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (CLI flags, config file, template)
/// - the render pipeline and its collaborators
/// - the initial sweep
/// - (unless `--once`) the file watcher, Ctrl-C handling and the runtime
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let root = project_root()?;
    let cfg = load_and_validate(&args, &root)?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let patterns = Arc::new(PatternSet::compile(&root, &cfg.pipeline.glob_patterns)?);

    if args.dry_run {
        print_dry_run(&cfg, &root, &patterns, &fs);
        return Ok(RunOutcome::Completed);
    }

    let renderer = Renderer::new(
        cfg.pipeline.clone(),
        &root,
        Arc::clone(&fs),
        Arc::new(SassCompiler::new()),
        Arc::new(Autoprefixer::from_queries(&cfg.browsers)?),
        Arc::new(ConsoleNotifier::new()),
    );

    // No output location at all is fatal for the whole session.
    if let Some(dest) = &cfg.pipeline.destination_dir {
        let dir = renderer.resolver().prepare_destination(dest)?;
        info!(?dir, "writing outputs to destination directory");
    }

    let tracker = GlobTracker::new(Arc::clone(&fs), Arc::clone(&patterns));
    let mut core = PipelineCore::new(renderer, tracker);

    if args.once {
        let (_core, report) = initial_sweep(core).await?;
        return Ok(outcome_of(&report));
    }

    let (rt_tx, rt_rx) = mpsc::channel::<PipelineEvent>(256);

    // Subscribe before the initial sweep so edits made during it queue up
    // instead of being lost.
    let watcher = spawn_watcher(Arc::clone(&patterns), Arc::clone(&fs), rt_tx.clone())?;
    debug!(?watcher, "watcher ready");

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(PipelineEvent::ShutdownRequested).await;
        });
    }

    (core, _) = initial_sweep(core).await?;

    let runtime = Runtime::new(core, rt_rx);
    runtime.run().await?;

    drop(watcher);
    Ok(RunOutcome::Completed)
}

async fn initial_sweep(mut core: PipelineCore) -> Result<(PipelineCore, SweepReport)> {
    let (core, report) = tokio::task::spawn_blocking(move || {
        let report = core.initialize();
        (core, report)
    })
    .await
    .map_err(Error::from)?;

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "initial sweep complete"
    );
    Ok((core, report))
}

fn outcome_of(report: &SweepReport) -> RunOutcome {
    if report.has_failures() {
        RunOutcome::RenderFailures
    } else {
        RunOutcome::Completed
    }
}

/// Working directory, canonicalized so watcher paths and glob matches share
/// one spelling.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.canonicalize().unwrap_or(cwd))
}

/// Print options, matched sources and their output paths. Nothing is
/// compiled, written or created.
fn print_dry_run(cfg: &ConfigFile, root: &Path, patterns: &Arc<PatternSet>, fs: &Arc<dyn FileSystem>) {
    let opts = &cfg.pipeline;
    println!("sasstpl dry-run");
    println!("  marker_start = {:?}", opts.marker_start);
    println!("  marker_end = {:?}", opts.marker_end);
    println!("  glob = {:?}", opts.glob_patterns);
    println!("  css_file = {}", opts.emit_css_file);
    println!("  wo_suffix = {}", opts.omit_suffix);
    println!("  js_file = {:?}", opts.code_file_extension);
    if let Some(dest) = &opts.destination_dir {
        println!("  destination = {dest:?}");
    }
    println!("  hide_reload = {}", opts.suppress_notification);
    println!("  browsers = {:?}", cfg.browsers);
    println!();

    let tracker = GlobTracker::new(Arc::clone(fs), Arc::clone(patterns));
    let resolver = crate::output::PathResolver::new(Arc::clone(fs), root);
    let files = tracker.resolve();

    println!("sources ({}):", files.len());
    for source in &files {
        let shown = display_path(root, source);
        if is_fragment(source) {
            println!("  - {shown} (fragment, no output)");
            continue;
        }
        match resolver.derive(source, opts) {
            Some(d) => println!("  - {shown} -> {}", display_path(root, &d.path())),
            None => println!("  - {shown} -> ?"),
        }
    }

    debug!("dry-run complete (nothing written)");
}
