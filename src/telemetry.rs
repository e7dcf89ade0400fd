//! Tracing initialization logic.

use crate::config::Config;
use crate::util;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Diagnostic log settings, taken from the global CLI flags.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
    pub verbose: bool,
}

impl From<&crate::cli::Args> for LogSettings {
    fn from(a: &crate::cli::Args) -> Self {
        LogSettings {
            filter: a.log_filter.clone(),
            json: a.log_json,
            verbose: a.verbose,
        }
    }
}

/// Initialize the tracing subscriber: stderr fmt layer, text or JSON.
///
/// `RUST_LOG` wins over the configured filter when set. Calling this twice
/// is harmless; the second subscriber is discarded.
pub fn init_tracing(settings: &LogSettings) {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| settings.filter.clone());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid log filter '{directives}': {e}");
        EnvFilter::new("input_tracker=info") // Default filter on parse error
    });

    let fmt_layer = if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(settings.verbose)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(settings.verbose)
            .with_level(true)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        // option_env! so builds outside a git checkout still work
        git_sha = option_env!("VERGEN_GIT_SHA_SHORT").unwrap_or("unknown"),
        build_ts = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        "input-tracker starting"
    );
}

/// Logs the effective session configuration.
pub fn log_config(cfg: &Config) {
    info!(
        devices = ?cfg.devices,
        output = %cfg.output.as_deref().map_or_else(|| "<none>".into(), |p| p.display().to_string()),
        max_events = cfg.limits.max_events,
        window_capacity = cfg.limits.windows.capacity,
        rate_window = %util::format_duration(cfg.limits.windows.rate_window),
        move_throttle = %util::format_duration(cfg.move_throttle),
        live_interval = %util::format_duration(cfg.live_interval),
        stop_key = %cfg.stop_key,
        ignore_repeats = cfg.ignore_repeats,
        "Configuration loaded"
    );
}
