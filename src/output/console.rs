// src/output/console.rs

//! Human-facing notifications.
//!
//! These are separate from `tracing` logs: a user running the watcher wants
//! a short colored line per written file regardless of the log level.

use std::fmt::Debug;
use std::io::IsTerminal;
use std::path::Path;

use crate::errors::RenderError;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Receives user-visible pipeline notifications.
pub trait Notifier: Send + Sync + Debug {
    /// An output file was written.
    fn reload(&self, path: &Path);

    /// A stale output file was deleted.
    fn removed(&self, path: &Path);

    /// Rendering or removing a file failed.
    fn failed(&self, error: &RenderError);
}

/// Prints notifications to stdout/stderr, colored when attached to a terminal
/// and `NO_COLOR` is unset.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    color: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        let color = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self { color }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn reload(&self, path: &Path) {
        println!(
            "[sasstpl] {} {}",
            self.paint(GREEN, "reload:"),
            self.paint(BLUE, &path.display().to_string())
        );
    }

    fn removed(&self, path: &Path) {
        println!(
            "[sasstpl] {} {}",
            self.paint(RED, "removed:"),
            path.display()
        );
    }

    fn failed(&self, error: &RenderError) {
        eprintln!("[sasstpl] {}", self.paint(RED, &format!("error: {error}")));
    }
}
