//! Shared helpers for sasstpl's integration tests: option builders, a
//! harness around `PipelineCore`, and fake collaborators.

pub mod builders;
pub mod fakes;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Upper bound for any async test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialise tracing for tests.
///
/// Output goes through `with_test_writer()`, so it only shows for failing
/// tests (or with `-- --nocapture`). The filter comes from `SASSTPL_LOG`,
/// e.g. `SASSTPL_LOG=sasstpl=trace cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SASSTPL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("sasstpl=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Run a future, failing the test after [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("test timed out")
}
