//! Logging bootstrap for engine binaries.
//!
//! Library crates in this workspace log through the `log` facade; a binary
//! calls [`init_logging`] once at startup to route those records through a
//! `tracing-subscriber` console layer with uptime timestamps. `RUST_LOG`
//! overrides the default filter when set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging, falling back to `default_filter` when
/// `RUST_LOG` is unset.
///
/// Call once at startup; a second call panics because the global subscriber
/// is already installed.
pub fn init_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// `EnvFilter` with the engine's default verbosity.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_subsystem_overrides_parse() {
        let filters = ["info", "warn,relic_sky=debug", "debug,relic_assets=trace"];
        for text in filters {
            assert!(
                EnvFilter::try_new(text).is_ok(),
                "filter {text:?} should parse"
            );
        }
    }
}
