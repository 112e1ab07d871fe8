//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Storage adapter selected at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Which storage adapter to wire
    pub storage: StorageBackend,

    /// Database connection URL (required for the Postgres backend)
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Apply the users schema on start-up
    pub run_migrations: bool,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL").or_else(|| lookup("PG_CONNSTRING"));
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let run_migrations = lookup("RUN_MIGRATIONS")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RUN_MIGRATIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            storage,
            database_url,
            database_max_connections,
            run_migrations,
            host,
            port,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/users")]).unwrap();

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 10);
        assert!(config.run_migrations);
        assert!(!config.is_production());
    }

    #[test]
    fn test_pg_connstring_fallback() {
        let config = config_from(&[("PG_CONNSTRING", "postgres://legacy/users")]).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://legacy/users"));
    }

    #[test]
    fn test_postgres_requires_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend_needs_no_url() {
        let config = config_from(&[("STORAGE_BACKEND", "Memory"), ("PORT", "8080")]).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("STORAGE_BACKEND", "sqlite")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("STORAGE_BACKEND")));

        let err = config_from(&[("STORAGE_BACKEND", "memory"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORT")));
    }
}
