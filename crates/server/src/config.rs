// Server configuration loaded from environment variables
// Decision: No DATABASE_URL means dev mode with the in-memory store

use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Origins allowed by CORS; empty means no CORS layer
    pub cors_origins: Vec<HeaderValue>,
    /// Prefix for API routes, e.g. "/api" (health stays unprefixed)
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            cors_origins: Vec::new(),
            api_prefix: String::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).filter(|s| !s.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?,
            None => DEFAULT_PORT,
        };
        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .trim()
                .parse()
                .with_context(|| format!("Invalid DB_MAX_CONNECTIONS: {}", n))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url: var("DATABASE_URL"),
            db_max_connections,
            cors_origins,
            api_prefix: var("API_PREFIX").unwrap_or_default(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
