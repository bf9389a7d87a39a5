//! Logging Infrastructure
//!
//! Structured logging setup for development and production.

/// Initialize the logger
///
/// Level comes from `RUST_LOG` when set, defaulting to `info` for the
/// server and `tower_http`.
pub fn init_logger() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pos_server=info,tower_http=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
