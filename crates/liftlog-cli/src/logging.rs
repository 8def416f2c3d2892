//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` always wins; otherwise the filter comes from the `-v` count,
//! then from `log_level` in the config file, then defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            with_target: false,
        }
    }
}

impl LogConfig {
    /// - 0 (no `-v`): `configured` level, or `warn`
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace, with module targets
    pub fn from_verbosity(verbosity: u8, configured: Option<&str>) -> Self {
        match verbosity {
            0 => Self {
                filter: configured.unwrap_or(DEFAULT_FILTER).to_string(),
                ..Self::default()
            },
            1 => Self {
                filter: "debug".to_string(),
                ..Self::default()
            },
            _ => Self {
                filter: "trace".to_string(),
                with_target: true,
            },
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
