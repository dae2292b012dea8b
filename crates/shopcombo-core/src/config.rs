use crate::app_config::{AppConfig, Environment, DEFAULT_SERVICE_URL};
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
/// Decoupled from the real environment so tests can pass a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SHOPCOMBO_ENV", "development"))?;
    let log_level = or_default("SHOPCOMBO_LOG_LEVEL", "info");

    let service_url = or_default("SHOPCOMBO_SERVICE_URL", DEFAULT_SERVICE_URL);
    if !service_url.starts_with("http://") && !service_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPCOMBO_SERVICE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{service_url}\""),
        });
    }

    let request_timeout_secs = parse_u64("SHOPCOMBO_REQUEST_TIMEOUT_SECS", "90")?;
    let user_agent = or_default("SHOPCOMBO_USER_AGENT", "shopcombo/0.1 (combo-generator)");
    let data_dir = PathBuf::from(or_default("SHOPCOMBO_DATA_DIR", "./.shopcombo"));
    let shop_url = lookup("SHOPCOMBO_SHOP_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let search_max_retries = parse_u32("SHOPCOMBO_SEARCH_MAX_RETRIES", "2")?;
    let search_backoff_base_secs = parse_u64("SHOPCOMBO_SEARCH_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        log_level,
        service_url,
        request_timeout_secs,
        user_agent,
        data_dir,
        shop_url,
        search_max_retries,
        search_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPCOMBO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
