use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub news_api_key: String,
    pub gemini_api_key: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML file overriding the built-in risk keyword list.
    pub keywords_path: Option<PathBuf>,
    /// Search query used by the scheduler and `POST /missions` when the
    /// caller does not supply one.
    pub default_query: String,
    /// NewsAPI origin; overridable for tests and proxies.
    pub news_api_base_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub collector_timeout_secs: u64,
    pub collector_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("keywords_path", &self.keywords_path)
            .field("default_query", &self.default_query)
            .field("news_api_base_url", &self.news_api_base_url)
            .field("database_url", &"[redacted]")
            .field("news_api_key", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("collector_timeout_secs", &self.collector_timeout_secs)
            .field("collector_user_agent", &self.collector_user_agent)
            .finish()
    }
}
