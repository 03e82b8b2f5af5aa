//! Log subscriber setup
//!
//! Logging starts at `info`. Once the configuration is read its `log.level`
//! replaces that default, unless `RUST_LOG` is set.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Map a configured level name to a filter directive
#[must_use]
pub fn filter_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "fatal" | "critical" => "error",
        _ => "info",
    }
}

/// Handle for changing the level after startup
pub struct LogHandle {
    filter: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

impl LogHandle {
    /// Apply the configured level
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            tracing::debug!("RUST_LOG is set, ignoring configured log level '{}'", level);
            return;
        }
        let Some(filter) = &self.filter else {
            return;
        };
        if let Err(e) = filter.reload(EnvFilter::new(filter_directive(level))) {
            tracing::warn!("Unable to change log level: {}", e);
        }
    }
}

/// Install the global subscriber
///
/// A second call leaves the first subscriber in place.
pub fn init_logging() -> LogHandle {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_ok();

    LogHandle {
        filter: installed.then_some(handle),
        from_env,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(filter_directive("warning"), "warn");
        assert_eq!(filter_directive("WARN"), "warn");
        assert_eq!(filter_directive("fatal"), "error");
        assert_eq!(filter_directive("error"), "error");
        assert_eq!(filter_directive("debug"), "debug");
        assert_eq!(filter_directive(""), "info");
        assert_eq!(filter_directive("verbose"), "info");
    }

    #[test]
    fn repeated_init_is_harmless() {
        let first = init_logging();
        let second = init_logging();
        assert!(second.filter.is_none());
        first.set_level("debug");
        second.set_level("error");
    }
}
