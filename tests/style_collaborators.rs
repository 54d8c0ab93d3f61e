// tests/style_collaborators.rs

mod common;
use crate::common::builders::OptionsBuilder;
use crate::common::fakes::RecordingNotifier;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::sync::Arc;

use sasstpl::engine::{PipelineCore, Renderer};
use sasstpl::fs::{FileSystem, RealFileSystem};
use sasstpl::style::{Autoprefixer, CssPostProcessor, Passthrough, SassCompiler, StyleCompiler};
use sasstpl::watch::{GlobTracker, PatternSet};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn sass_compiler_resolves_imports_next_to_source() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("_vars.scss"), "$accent: red;\n")?;
    let main = dir.path().join("main.scss");
    fs::write(&main, "@import 'vars';\na {\n  color: $accent;\n  .b { margin: 0; }\n}\n")?;

    let css = SassCompiler::new().compile(&main)?;

    assert!(css.contains("color: red"), "{css}");
    assert!(css.contains("a .b"), "{css}");
    Ok(())
}

#[test]
fn sass_compiler_uses_extra_load_paths() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("shared"))?;
    fs::create_dir_all(dir.path().join("src"))?;
    fs::write(dir.path().join("shared/_theme.scss"), "$gap: 4px;\n")?;
    let main = dir.path().join("src/card.scss");
    fs::write(&main, "@import 'theme';\n.card { padding: $gap; }\n")?;

    let css = SassCompiler::new()
        .with_load_path(dir.path().join("shared"))
        .compile(&main)?;

    assert!(css.contains("padding: 4px"), "{css}");
    Ok(())
}

#[test]
fn sass_error_surfaces_as_compile_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let main = dir.path().join("bad.scss");
    fs::write(&main, "@error \"nope\";\n")?;

    assert!(SassCompiler::new().compile(&main).is_err());
    assert!(SassCompiler::new().compile(&dir.path().join("missing.scss")).is_err());
    Ok(())
}

#[test]
fn autoprefixer_adds_vendor_prefixes_for_old_targets() -> TestResult {
    let prefixer = Autoprefixer::from_queries(&["safari 12"])?;

    let css = prefixer.process(".a { user-select: none; }")?;

    assert!(css.contains("-webkit-user-select"), "{css}");
    assert!(css.contains(".a"), "{css}");
    Ok(())
}

#[test]
fn autoprefixer_rejects_unknown_queries() {
    assert!(Autoprefixer::from_queries(&["definitely not a browser 9000"]).is_err());
}

#[test]
fn passthrough_returns_input() -> TestResult {
    assert_eq!(Passthrough.process("a{b:c}")?, "a{b:c}");
    Ok(())
}

#[test]
fn real_pipeline_renders_sass_into_template() -> TestResult {
    let dir = tempfile::tempdir()?;
    let root = dir.path().canonicalize()?;
    fs::create_dir_all(root.join("src"))?;
    fs::write(root.join("src/_mixins.scss"), "$pad: 2px;\n")?;
    fs::write(root.join("src/button.scss"), "@import 'mixins';\n.btn { padding: $pad; }\n")?;
    fs::write(
        root.join("src/button-styles.css.js"),
        "import { css } from 'lit';\n// keep me\nexport default css`old`;\n",
    )?;

    let opts = OptionsBuilder::new().build();
    let real: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let patterns = Arc::new(PatternSet::compile(&root, &opts.glob_patterns)?);
    let renderer = Renderer::new(
        opts,
        &root,
        Arc::clone(&real),
        Arc::new(SassCompiler::new()),
        Arc::new(Passthrough),
        Arc::new(RecordingNotifier::default()),
    );
    let mut core = PipelineCore::new(renderer, GlobTracker::new(real, patterns));

    let report = core.initialize();

    assert_eq!(report.written, vec![root.join("src/button-styles.css.js")]);
    assert_eq!(report.skipped, 1);
    let out = fs::read_to_string(root.join("src/button-styles.css.js"))?;
    assert!(out.starts_with("import { css } from 'lit';\n// keep me\nexport default css`"));
    assert!(out.contains("padding: 2px"), "{out}");
    assert!(out.ends_with("`;\n"));
    assert!(!out.contains("old"));
    Ok(())
}
