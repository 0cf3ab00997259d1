//! Store factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Store;
use crate::domain::user::UserEntity;
use crate::domain::DomainError;

use super::in_memory::InMemoryStore;
use super::postgres::{PostgresConfig, PostgresUserStore};

/// Supported storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Creates a PostgreSQL configuration from a URL
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating store instances
#[derive(Debug)]
pub struct StoreFactory;

impl StoreFactory {
    /// Creates the user store selected by the configuration
    pub async fn create_user_store(
        config: &StorageConfig,
    ) -> Result<Arc<dyn Store<UserEntity>>, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory user store");
                Ok(Arc::new(InMemoryStore::<UserEntity>::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL user store"
                );
                let store = PostgresUserStore::connect(pg_config).await?;
                store.ensure_table().await?;
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_parse() {
        assert_eq!(StorageType::parse("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("unknown"), None);
    }

    #[test]
    fn test_storage_config_types() {
        let in_memory = StorageConfig::in_memory();
        assert_eq!(in_memory.storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::postgres_url("postgres://localhost/test");
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_storage_config_postgres() {
        let config = PostgresConfig::new("postgres://localhost/test").with_max_connections(20);
        let storage_config = StorageConfig::postgres(config.clone());

        match storage_config {
            StorageConfig::Postgres(pg_config) => {
                assert_eq!(pg_config.url, config.url);
                assert_eq!(pg_config.max_connections, 20);
            }
            StorageConfig::InMemory => panic!("Expected Postgres config"),
        }
    }

    #[tokio::test]
    async fn test_create_in_memory_user_store() {
        let store = StoreFactory::create_user_store(&StorageConfig::in_memory())
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }
}
