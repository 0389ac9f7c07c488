//! Diagnostic logging to stderr.
//!
//! `TODOCTL_LOG` takes an `EnvFilter` directive (e.g. `todoctl=trace`). Without it,
//! `--verbose` selects `debug` and the default is `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TODOCTL_LOG";

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded or under test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
