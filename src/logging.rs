//! Process-wide `tracing` subscriber.
//!
//! Log lines go to stderr: stdout may be carrying the PNG stream.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT_GUARD: OnceLock<()> = OnceLock::new();

/// Install the fmt subscriber once. `RUST_LOG` overrides the default level,
/// which is `debug` when `verbose` and `warn` otherwise.
pub fn init_tracing(verbose: bool) {
    INIT_GUARD.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if let Err(err) = result {
            // another subscriber was installed first, e.g. by an embedding app
            tracing::debug!("tracing subscriber already set: {err}");
        }
    });
}
