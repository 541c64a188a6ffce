use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

#[cfg(not(target_arch = "wasm32"))]
use std::io::IsTerminal;

#[cfg(not(target_arch = "wasm32"))]
use tracing_error::ErrorLayer;

#[cfg(target_arch = "wasm32")]
use tracing_web::MakeWebConsoleWriter;

use tracing::level_filters::LevelFilter;

use super::error::InfraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::Compact,
        }
    }
}

/// Install a global tracing subscriber using the provided logging settings.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

/// Install a global tracing subscriber writing to the browser console.
///
/// There is no environment to read filters from, and no wall clock available to
/// the formatter, so the level comes straight from the settings and timestamps are off.
#[cfg(target_arch = "wasm32")]
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    let env_filter = EnvFilter::default().add_directive(logging.level.into());

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .without_time()
            .with_writer(MakeWebConsoleWriter::new())
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_ansi(false)
            .with_target(true)
            .with_writer(MakeWebConsoleWriter::new())
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}
