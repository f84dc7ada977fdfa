use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "blend_editor=debug,blend_core=trace").
///
/// `for_tests` routes output through the test harness capture instead of
/// writing straight to stderr.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub for_tests: bool,
}

impl LoggingConfig {
    /// Configuration with an explicit filter string, ignoring `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Configuration suitable for `#[test]` functions.
    pub fn for_tests() -> Self {
        Self {
            for_tests: true,
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            for_tests: false,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. If another logger was installed
/// first (a host application, a test harness) the call is a no-op as well.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        builder.is_test(config.for_tests);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::for_tests());
        init_logging(LoggingConfig::with_filter("trace"));
        log::info!("still alive");
    }

    #[test]
    fn with_filter_keeps_other_defaults() {
        let cfg = LoggingConfig::with_filter("blend_core=debug");
        assert_eq!(cfg.env_filter.as_deref(), Some("blend_core=debug"));
        assert!(!cfg.for_tests);
    }
}
