//! Environment variable names read by [`TracingConfig::from_env`].
//!
//! These are purely helpers; records themselves never touch the
//! environment.
//!
//! [`TracingConfig::from_env`]: crate::init::TracingConfig::from_env

/// Most verbose severity name that is printed, e.g. `DEBUG` or `warn`.
pub const STRUCTURED_ERROR_LOG_LEVEL_ENV: &str = "STRUCTURED_ERROR_LOG_LEVEL";

/// `true` or `false`; whether console output uses ANSI colors.
pub const STRUCTURED_ERROR_LOG_ANSI_ENV: &str = "STRUCTURED_ERROR_LOG_ANSI";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
