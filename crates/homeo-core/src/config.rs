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
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it in tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so callers and tests can supply a
/// plain `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let api_url = non_empty("HOMEO_API_URL", "http://localhost:5000")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HOMEO_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{api_url}'"),
        });
    }

    let env = parse_environment(&or_default("HOMEO_ENV", "development"));
    let log_level = or_default("HOMEO_LOG_LEVEL", "info");
    let cart_path = PathBuf::from(or_default("HOMEO_CART_PATH", "./.homeo/cart-storage.json"));

    let currency = non_empty("HOMEO_CURRENCY", "INR")?.to_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HOMEO_CURRENCY".to_string(),
            reason: format!("expected a three-letter ISO 4217 code, got '{currency}'"),
        });
    }

    let http_timeout_secs = parse_u64("HOMEO_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("HOMEO_USER_AGENT", "homeo/0.1 (storefront)");
    let payment_script_url = or_default(
        "HOMEO_PAYMENT_SCRIPT_URL",
        "https://checkout.razorpay.com/v1/checkout.js",
    );
    let store_name = or_default("HOMEO_STORE_NAME", "Homeo Handmade Soaps");

    Ok(AppConfig {
        api_url,
        env,
        log_level,
        cart_path,
        currency,
        http_timeout_secs,
        user_agent,
        payment_script_url,
        store_name,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
