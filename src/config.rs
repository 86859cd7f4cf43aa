use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Base URL of a remote availability service. Unset means the local
    /// SQLite calendar is used directly.
    pub oracle_url: Option<String>,
    pub oracle_timeout_secs: u64,
    pub max_alternatives: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "slotbook.db".to_string()),
            oracle_url: env::var("ORACLE_URL").ok().filter(|v| !v.is_empty()),
            oracle_timeout_secs: env::var("ORACLE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_alternatives: env::var("MAX_ALTERNATIVES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(crate::services::alternatives::DEFAULT_MAX_ALTERNATIVES),
        }
    }
}
