//! Logger setup for the binary and for tests that want traversal logs.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter: traversal logs at `level`, everything else at warn.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Initializes the global logger.
///
/// `RUST_LOG` overrides the default filter. When `verbose` is `true`,
/// per-tick debug messages from traversal are printed.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set, so tests can call
    // `init` repeatedly.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_enables_debug() {
        assert_eq!(default_filter(true), "warn,railwalk=DEBUG");
        assert_eq!(default_filter(false), "warn,railwalk=INFO");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
        log::info!("logger initialised");
    }
}
