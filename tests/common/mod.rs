#![allow(dead_code)]

use std::future::Future;
use std::time::Duration;

pub use dagviz_test_utils::init_tracing;

/// Upper bound for one whole pipeline run in a test, real processes included.
const PIPELINE_TIMEOUT: Duration = Duration::from_secs(5);

/// Await `f`, panicking if the pipeline hangs (a stuck child process, say).
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(PIPELINE_TIMEOUT, f).await {
        Ok(out) => out,
        Err(_) => panic!("pipeline did not finish within {PIPELINE_TIMEOUT:?}"),
    }
}
