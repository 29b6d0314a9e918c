use std::sync::Once;

/// How `init_logging` sets up `env_logger`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter in `env_logger` syntax, e.g. `"tilepaint_ui=debug"`. Takes
    /// precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when neither filter is given.
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Window-system crates that log per event at `info`.
const QUIET_CRATES: &[&str] = &["winit", "softbuffer"];

/// The filter string to apply: the configured filter, then `rust_log`,
/// then the default level with [`QUIET_CRATES`] held at `warn`.
fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    config.env_filter.clone().or(rust_log).unwrap_or_else(|| {
        let mut filter = config.default_level.as_str().to_ascii_lowercase();
        for krate in QUIET_CRATES {
            filter.push_str(&format!(",{krate}=warn"));
        }
        filter
    })
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(&config, std::env::var("RUST_LOG").ok());
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);

        // A test harness may already own the logger.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with '{filter}'");
        }
    });
}
