use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // Database settings
    #[serde(default = "default_db_name")]
    pub db_name: String,
    /// Explicit connection string. When unset, a file database named after
    /// `db_name` is used.
    pub database_url: Option<String>,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    // Comma separated list, "*" allows every origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    // Song catalog the proxy routes forward to
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_db_name() -> String {
    "songbook".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_upstream_base_url() -> String {
    "https://htnguonsong.com/api".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    5
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite:./data/{}.db?mode=rwc", self.db_name),
        }
    }

    /// Origins from `CORS_ORIGINS`, trimmed, empty entries dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Only an explicit `*` opens the API to every origin; an empty list allows none.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins().iter().any(|origin| origin == "*")
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
