// src/style/mod.rs

//! Text transforms applied to each source file.
//!
//! Both are plain "text in, text out" collaborators behind traits so the
//! pipeline can be exercised with fakes:
//! - [`StyleCompiler`]: Sass source path to CSS ([`SassCompiler`] via `grass`).
//! - [`CssPostProcessor`]: CSS to vendor-prefixed CSS ([`Autoprefixer`] via
//!   `lightningcss`).

mod prefixer;
mod sass;

use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;

pub use prefixer::Autoprefixer;
pub use sass::SassCompiler;

/// Compiles one stylesheet source file to CSS.
pub trait StyleCompiler: Send + Sync + Debug {
    fn compile(&self, source: &Path) -> Result<String>;
}

/// Rewrites compiled CSS (vendor prefixes and the like).
pub trait CssPostProcessor: Send + Sync + Debug {
    fn process(&self, css: &str) -> Result<String>;
}

/// Post-processor that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl CssPostProcessor for Passthrough {
    fn process(&self, css: &str) -> Result<String> {
        Ok(css.to_string())
    }
}
