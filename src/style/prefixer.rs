// src/style/prefixer.rs

use anyhow::{anyhow, Result};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use super::CssPostProcessor;

/// Adds vendor prefixes for a browserslist target set using `lightningcss`.
///
/// Output stays human readable (no minification), only prefixes and
/// target-specific lowering are applied.
#[derive(Debug, Clone)]
pub struct Autoprefixer {
    browsers: Option<Browsers>,
}

impl Autoprefixer {
    /// Build from browserslist queries, e.g. `["defaults"]` or
    /// `["last 2 versions", "> 1%"]`.
    pub fn from_queries<S: AsRef<str>>(queries: &[S]) -> Result<Self> {
        let queries: Vec<&str> = queries.iter().map(AsRef::as_ref).collect();
        let browsers = Browsers::from_browserslist(queries)
            .map_err(|err| anyhow!("invalid browserslist query: {err}"))?;
        Ok(Self { browsers })
    }

    fn targets(&self) -> Targets {
        Targets {
            browsers: self.browsers.clone(),
            ..Targets::default()
        }
    }
}

impl CssPostProcessor for Autoprefixer {
    fn process(&self, css: &str) -> Result<String> {
        let mut sheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|err| anyhow!("{err}"))?;

        sheet
            .minify(MinifyOptions {
                targets: self.targets(),
                ..MinifyOptions::default()
            })
            .map_err(|err| anyhow!("{err}"))?;

        let printed = sheet
            .to_css(PrinterOptions {
                targets: self.targets(),
                ..PrinterOptions::default()
            })
            .map_err(|err| anyhow!("{err}"))?;

        Ok(printed.code)
    }
}
