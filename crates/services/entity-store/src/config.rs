//! Entity store configuration.

use std::env;
use std::str::FromStr;

use common::DatabaseConfig;

/// Which document store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local, nothing survives a restart
    Memory,
    /// JSONB documents in PostgreSQL
    #[default]
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// Entity store configuration.
#[derive(Debug, Clone, Default)]
pub struct EntityStoreConfig {
    /// Store backend
    pub backend: StoreBackend,
    /// Database connection settings (postgres backend)
    pub database: DatabaseConfig,
}

impl EntityStoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = DatabaseConfig::default();

        let backend = lookup("ENTITY_STORE_BACKEND")
            .map(|value| {
                value.parse().unwrap_or_else(|e| {
                    tracing::warn!("{}, falling back to postgres", e);
                    StoreBackend::Postgres
                })
            })
            .unwrap_or_default();

        Self {
            backend,
            database: DatabaseConfig {
                url: lookup("ENTITY_STORE_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: lookup("ENTITY_STORE_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: lookup("ENTITY_STORE_MIN_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.min_connections),
                connect_timeout_secs: lookup("ENTITY_STORE_CONNECT_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.connect_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> EntityStoreConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EntityStoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(config.database.url, DatabaseConfig::default().url);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_service_url_wins_over_shared_url() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://shared/db"),
            ("ENTITY_STORE_DATABASE_URL", "postgres://entity/db"),
        ]);
        assert_eq!(config.database.url, "postgres://entity/db");

        let config = config_from(&[("DATABASE_URL", "postgres://shared/db")]);
        assert_eq!(config.database.url, "postgres://shared/db");
    }

    #[test]
    fn test_backend_and_pool_overrides() {
        let config = config_from(&[
            ("ENTITY_STORE_BACKEND", "Memory"),
            ("ENTITY_STORE_MAX_CONNECTIONS", "32"),
            ("ENTITY_STORE_MIN_CONNECTIONS", "not-a-number"),
            ("ENTITY_STORE_CONNECT_TIMEOUT_SECS", "2"),
        ]);
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.database.max_connections, 32);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.connect_timeout_secs, 2);
    }

    #[test]
    fn test_unknown_backend_falls_back() {
        let config = config_from(&[("ENTITY_STORE_BACKEND", "cassandra")]);
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert!("cassandra".parse::<StoreBackend>().is_err());
    }
}
