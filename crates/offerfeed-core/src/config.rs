use crate::app_config::{AppConfig, ProxySettings, RetrySettings, StoreSearchSettings};
use crate::ConfigError;

const DEFAULT_OFFERS_URL: &str = "https://www.clickforbrand.de/offers-qa/rest/v1/offers";
const DEFAULT_STORES_URL: &str = "https://www.netto-online.de/api/stores/search_stores";
const DEFAULT_USER_AGENT: &str = "NettoApp/7.1.2 (Build: 7.1.2.1; Android 11)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
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
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is a value that
/// is present but malformed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_with = |var: &str,
                      default: &str,
                      validate: fn(&str) -> Result<(), String>|
     -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        validate(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })?;
        Ok(raw)
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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("OFFERFEED_LOG_LEVEL", "info");
    let user_agent = or_default("OFFERFEED_USER_AGENT", DEFAULT_USER_AGENT);
    let offers_url = parse_with("OFFERFEED_OFFERS_URL", DEFAULT_OFFERS_URL, validate_url)?;
    let api_key = or_default("OFFERFEED_API_KEY", "78b72bf5-3229-4972-88df-486bcf6191bb");

    let store_search = StoreSearchSettings {
        url: parse_with("OFFERFEED_STORES_URL", DEFAULT_STORES_URL, validate_url)?,
        api_user: or_default("OFFERFEED_STORE_API_USER", "nettoapp"),
        api_token: or_default("OFFERFEED_STORE_API_TOKEN", "e6Ddd8gYybhZVTen"),
        user_ip: or_default("OFFERFEED_STORE_USER_IP", "91.237.117.254"),
        latitude: parse_f64("OFFERFEED_SEARCH_LATITUDE", "50.0")?,
        longitude: parse_f64("OFFERFEED_SEARCH_LONGITUDE", "8.0")?,
        radius_km: parse_f64("OFFERFEED_SEARCH_RADIUS_KM", "15.0")?,
    };

    let proxy = ProxySettings {
        enabled: parse_bool("OFFERFEED_USE_PROXY", &or_default("OFFERFEED_USE_PROXY", "true"))?,
        host: or_default("OFFERFEED_PROXY_HOST", "127.0.0.1:9150"),
        user: or_default("OFFERFEED_PROXY_USER", "user"),
        timeout_secs: parse_u64("OFFERFEED_PROXY_TIMEOUT_SECS", "60")?,
    };
    let direct_timeout_secs = parse_u64("OFFERFEED_DIRECT_TIMEOUT_SECS", "50")?;

    let deadline_secs = match lookup("OFFERFEED_DEADLINE_SECS") {
        Ok(_) => match parse_u64("OFFERFEED_DEADLINE_SECS", "0")? {
            0 => {
                return Err(ConfigError::InvalidEnvVar {
                    var: "OFFERFEED_DEADLINE_SECS".to_string(),
                    reason: "deadline must be at least 1 second; unset it for no deadline"
                        .to_string(),
                })
            }
            secs => Some(secs),
        },
        Err(_) => None,
    };
    let retry = RetrySettings {
        max_attempts: parse_u32("OFFERFEED_MAX_ATTEMPTS", "0")?,
        backoff_base_ms: parse_u64("OFFERFEED_RETRY_BACKOFF_BASE_MS", "0")?,
        max_delay_ms: parse_u64("OFFERFEED_RETRY_MAX_DELAY_MS", "60000")?,
        deadline_secs,
    };

    Ok(AppConfig {
        log_level,
        user_agent,
        offers_url,
        api_key,
        store_search,
        proxy,
        direct_timeout_secs,
        retry,
    })
}

/// Accepts `true`/`false`/`1`/`0`/`yes`/`no`, case-insensitively.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

fn validate_url(raw: &str) -> Result<(), String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("\"{raw}\" is not an http(s) URL"))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
