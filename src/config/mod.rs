// src/config/mod.rs

//! Configuration loading and validation for sasstpl.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the run options (`model.rs`).
//! - Merge CLI flags, the optional config file and the template (`loader.rs`).
//! - Apply defaults and check invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_template};
pub use model::{ConfigFile, PipelineOptions, RawConfigFile};
pub use validate::{build_config, validate_pipeline_options};
