use crate::env::{env_or, STRUCTURED_ERROR_LOG_ANSI_ENV, STRUCTURED_ERROR_LOG_LEVEL_ENV};
use crate::severity::Severity;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Console logging configuration used by [`init_tracing_with_config`].
///
/// **Fields**
/// - `max_severity`: most verbose level that is printed. Filtering is done
///   per band, so `DEBUG3` behaves like `DEBUG`.
/// - `enable_ansi`: colorize console output.
/// - `with_target`: print the event target (module path).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracingConfig {
    pub max_severity: Severity,
    pub enable_ansi: bool,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            max_severity: Severity::INFO,
            enable_ansi: true,
            with_target: true,
        }
    }
}

impl TracingConfig {
    /// Build a config from `STRUCTURED_ERROR_LOG_LEVEL` and
    /// `STRUCTURED_ERROR_LOG_ANSI`. Unset or unparsable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_severity = env_or(STRUCTURED_ERROR_LOG_LEVEL_ENV, "INFO")
            .parse()
            .unwrap_or(defaults.max_severity);
        let enable_ansi = env_or(STRUCTURED_ERROR_LOG_ANSI_ENV, "true")
            .trim()
            .parse()
            .unwrap_or(defaults.enable_ansi);
        Self {
            max_severity,
            enable_ansi,
            ..defaults
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.max_severity.band().tracing_level())
    }
}

/// Error returned by [`init_tracing_with_config`].
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install a global `fmt` subscriber so that [`StructuredError::emit`]
/// output reaches the console.
///
/// [`StructuredError::emit`]: crate::record::StructuredError::emit
pub fn init_tracing_with_config(config: TracingConfig) -> Result<(), InitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(config.enable_ansi)
        .with_target(config.with_target);
    let subscriber = Registry::default()
        .with(config.level_filter())
        .with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Initialize console logging with [`TracingConfig::default`].
pub fn init_tracing() -> Result<(), InitError> {
    init_tracing_with_config(TracingConfig::default())
}
