//! Shared domain types and configuration for PRIS (Polio Rumor
//! Intelligence System).

mod app_config;
mod config;
mod keywords;
mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use keywords::{KeywordSet, KeywordSetError, NO_MATCH_SENTINEL};
pub use types::{AnalyzedSignal, RiskLevel, RiskTrendVerdict, Signal};
