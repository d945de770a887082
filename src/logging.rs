//! Diagnostic logging setup.

use log::LevelFilter;

/// Default filter level for a run.
#[must_use]
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the `env_logger` backend. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}
