// src/output/mod.rs

//! Everything between compiled CSS and the file on disk.
//!
//! - [`resolver`] decides where the output for a source file lives.
//! - [`injector`] decides what the output contains (marker replace vs
//!   fresh template).
//! - [`writer`] puts it on disk and deletes stale outputs.
//! - [`console`] prints the user-facing reload/remove lines.

pub mod console;
pub mod injector;
pub mod resolver;
pub mod writer;

pub use console::{ConsoleNotifier, Notifier};
pub use injector::TemplateInjector;
pub use resolver::PathResolver;
pub use writer::OutputWriter;
