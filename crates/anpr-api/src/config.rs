// API server configuration
//
// Loaded from environment variables (a `.env` file is read first by main).

use anyhow::{Context, Result};
use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration for the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Postgres connection string
    pub database_url: String,

    /// Upper bound on pooled database connections
    pub max_connections: u32,

    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Optional prefix for the /v1 routes (e.g. "/api")
    pub api_prefix: String,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

impl ApiConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: Postgres connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
    /// - `BIND_ADDR`: Listen address (default: 0.0.0.0:9000)
    /// - `API_PREFIX`: Route prefix (default: empty)
    /// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .context("DATABASE_URL environment variable required")?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_MAX_CONNECTIONS,
                        "Invalid DATABASE_MAX_CONNECTIONS, using default"
                    );
                    DEFAULT_MAX_CONNECTIONS
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("BIND_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let api_prefix = lookup("API_PREFIX").unwrap_or_default();

        let run_migrations = lookup("RUN_MIGRATIONS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            api_prefix,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/anpr")]).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/anpr");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.api_prefix, "");
        assert!(config.run_migrations);
    }

    #[test]
    fn test_database_url_required() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        assert!(config_from(&[("DATABASE_URL", "")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/anpr"),
            ("DATABASE_MAX_CONNECTIONS", "25"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("API_PREFIX", "/api"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(config.max_connections, 25);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_pool_size_falls_back() {
        for raw in ["lots", "0", "-3"] {
            let config = config_from(&[
                ("DATABASE_URL", "postgres://db/anpr"),
                ("DATABASE_MAX_CONNECTIONS", raw),
            ])
            .unwrap();
            assert_eq!(config.max_connections, 10);
        }
    }
}
