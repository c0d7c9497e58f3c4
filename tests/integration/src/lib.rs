//! Integration tests for the RustPush client.
//!
//! Tests in `test_live` require real application credentials in
//! `RUSTPUSH_APP_ID`, `RUSTPUSH_KEY` and `RUSTPUSH_SECRET` (plus the optional
//! `RUSTPUSH_*` configuration variables). They are marked `#[ignore]` so they
//! don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p rustpush-integration -- --ignored
//! ```
//!
//! Tests in `test_transport` drive the public client API through a custom
//! transport and always run.

use std::sync::Once;

use rustpush_client::{PushClient, TracingLogSink};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create a client for the application named by the environment.
#[must_use]
pub fn live_client() -> PushClient {
    init_tracing();

    PushClient::from_env()
        .unwrap_or_else(|e| panic!("failed to create client from environment: {e}"))
        .with_log_sink(std::sync::Arc::new(TracingLogSink))
}

/// Generate a unique channel name for a test.
#[must_use]
pub fn test_channel_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("{prefix}-test-{id}")
}

mod test_live;
mod test_transport;
