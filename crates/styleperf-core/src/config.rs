use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("STYLEPERF_ENV", "development"))?;
    let log_level = or_default("STYLEPERF_LOG_LEVEL", "info");
    let feeds_dir = PathBuf::from(or_default("STYLEPERF_FEEDS_DIR", "./data"));
    let feeds_path = PathBuf::from(or_default("STYLEPERF_FEEDS_PATH", "./config/feeds.yaml"));

    let raw_ratio = or_default("STYLEPERF_STRENGTH_RATIO", "1.3");
    let strength_ratio = Decimal::from_str(raw_ratio.trim())
        .map_err(|e| invalid("STYLEPERF_STRENGTH_RATIO", e.to_string()))?;
    if strength_ratio <= Decimal::ZERO {
        return Err(invalid(
            "STYLEPERF_STRENGTH_RATIO",
            format!("must be greater than zero, got {strength_ratio}"),
        ));
    }

    let min_strong_qty = or_default("STYLEPERF_MIN_STRONG_QTY", "3")
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid("STYLEPERF_MIN_STRONG_QTY", e.to_string()))?;

    Ok(AppConfig {
        env,
        log_level,
        feeds_dir,
        feeds_path,
        strength_ratio,
        min_strong_qty,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STYLEPERF_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
