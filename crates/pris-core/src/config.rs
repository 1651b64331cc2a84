use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process. Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic is decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    // Credentials fail fast: a missing key must never degrade into a run
    // that silently collects nothing.
    let database_url = require("DATABASE_URL")?;
    let news_api_key = require("NEWS_API_KEY")?;
    let gemini_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("PRIS_ENV", "development"));

    let bind_addr = parse_addr("PRIS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("PRIS_LOG_LEVEL", "info");
    let keywords_path = lookup("PRIS_KEYWORDS_PATH").ok().map(PathBuf::from);
    let default_query = or_default("PRIS_DEFAULT_QUERY", "polio vaccine Kenya");
    let news_api_base_url = or_default("PRIS_NEWS_API_BASE_URL", "https://newsapi.org");

    let db_max_connections = parse_u32("PRIS_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("PRIS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PRIS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let collector_timeout_secs = parse_u64("PRIS_COLLECTOR_TIMEOUT_SECS", "30")?;
    let collector_user_agent = or_default(
        "PRIS_COLLECTOR_USER_AGENT",
        "pris/0.1 (rumor-intelligence)",
    );

    Ok(AppConfig {
        database_url,
        news_api_key,
        gemini_api_key,
        env,
        bind_addr,
        log_level,
        keywords_path,
        default_query,
        news_api_base_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        collector_timeout_secs,
        collector_user_agent,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
