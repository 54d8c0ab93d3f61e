#![allow(dead_code, unused_imports)]

pub use sasstpl_test_utils::builders;
pub use sasstpl_test_utils::fakes;
pub use sasstpl_test_utils::{init_tracing, with_timeout};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sasstpl::fs::FileSystem;
use sasstpl::fs::mock::MockFileSystem;

/// Project root used by all mock filesystem tests.
pub const ROOT: &str = "/proj";

pub fn root() -> PathBuf {
    PathBuf::from(ROOT)
}

pub fn at(rel: &str) -> PathBuf {
    Path::new(ROOT).join(rel)
}

/// Mock filesystem with `/proj` present, plus a trait-object handle to it.
pub fn mock_fs() -> (MockFileSystem, Arc<dyn FileSystem>) {
    let mock = MockFileSystem::new();
    mock.add_dir(ROOT);
    let shared: Arc<dyn FileSystem> = Arc::new(mock.clone());
    (mock, shared)
}
