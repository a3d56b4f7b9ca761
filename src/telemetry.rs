//! Tracing initialisation for the binary.
//!
//! Diagnostics (command lines, allocation candidates, fallbacks) are logged
//! at debug level and stay hidden unless `RUST_LOG` asks for them. They go
//! to stderr so they never mix with the command output on stdout.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Initialise the global tracing subscriber.
///
/// Only the first call takes effect.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
