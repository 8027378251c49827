//! Logging setup for the CourseHub server

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,coursehub=debug,tower_http=info";

/// Output format of the console subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` (`json` selects JSON, anything else pretty)
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global tracing subscriber
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = Registry::default().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_thread_ids(true).with_target(true))
            .try_init()?,
    }

    Ok(())
}
