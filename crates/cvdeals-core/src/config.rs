use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Browser-like identity used when `CVDEALS_USER_AGENT` is not set. Both
/// retailers reject requests carrying an obvious bot user-agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed. No variable
/// is required; every setting has a default.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let request_timeout_secs = parse_u64("CVDEALS_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CVDEALS_USER_AGENT", DEFAULT_USER_AGENT);
    let out_dir = PathBuf::from(or_default("CVDEALS_OUT_DIR", "./data"));
    let brands_path = PathBuf::from(or_default("CVDEALS_BRANDS_PATH", "./config/brands.yaml"));
    let max_pages = parse_u32("CVDEALS_MAX_PAGES", "200")?;
    let api_page_size = parse_u32("CVDEALS_API_PAGE_SIZE", "100")?;
    let log_level = or_default("CVDEALS_LOG_LEVEL", "info");

    Ok(AppConfig {
        request_timeout_secs,
        user_agent,
        out_dir,
        brands_path,
        max_pages,
        api_page_size,
        log_level,
    })
}
