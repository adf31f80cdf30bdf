//! Diagnostic logging to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SHELF_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Filter from SHELF_LOG, then the configured level, then `warn`.
pub fn build_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    configured
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(configured: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_filter(configured))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_used_without_env() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(build_filter(Some("debug")).to_string(), "debug");
        assert_eq!(build_filter(None).to_string(), "warn");
    }
}
