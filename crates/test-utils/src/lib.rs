pub mod builders;
pub mod fake_backend;

use std::sync::Once;

use dagviz::logging::{LOG_ENV_VAR, filter_directive};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install a captured `tracing` subscriber once per test binary.
///
/// Honours `DAGVIZ_LOG` the same way the binary does, so
/// `DAGVIZ_LOG=dagviz::pipeline=debug cargo test -- --nocapture` shows the
/// orchestrator's stage events.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env = std::env::var(LOG_ENV_VAR).ok();
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive(None, env.as_deref())))
            .with_test_writer()
            .try_init();
    });
}
