//! PostgreSQL user store with connection pooling

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::storage::Store;
use crate::domain::user::{UserEntity, UserFilter};
use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/users".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

// Default names Postgres gives the constraints declared in `ensure_table`
const EMAIL_CONSTRAINT: &str = "users_email_key";
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";

const SELECT_ALL: &str = "SELECT id, email, name, is_admin FROM users ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, email, name, is_admin FROM users WHERE id = $1";
const SELECT_BY_EMAIL: &str =
    "SELECT id, email, name, is_admin FROM users WHERE email = $1 LIMIT 1";

/// Stores users in a `users` table whose `email` column is UNIQUE
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a pooled store from configuration
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Ensures the users table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                is_admin BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl Store<UserEntity> for PostgresUserStore {
    async fn find(&self) -> Result<Vec<UserEntity>, DomainError> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        Ok(rows.iter().map(row_to_entity).collect())
    }

    async fn find_one(&self, filter: &UserFilter) -> Result<Option<UserEntity>, DomainError> {
        let row = match filter {
            UserFilter::Id(id) => {
                sqlx::query(SELECT_BY_ID)
                    .bind(*id)
                    .fetch_optional(&self.pool)
                    .await
            }
            UserFilter::Email(email) => {
                sqlx::query(SELECT_BY_EMAIL)
                    .bind(email)
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        Ok(row.as_ref().map(row_to_entity))
    }

    async fn save(&self, entity: UserEntity) -> Result<UserEntity, DomainError> {
        let result = match entity.id {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO users (email, name, is_admin)
                    VALUES ($1, $2, $3)
                    RETURNING id, email, name, is_admin
                    "#,
                )
                .bind(&entity.email)
                .bind(&entity.name)
                .bind(entity.is_admin)
                .fetch_one(&self.pool)
                .await
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO users (id, email, name, is_admin)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (id) DO UPDATE
                    SET email = EXCLUDED.email, name = EXCLUDED.name, is_admin = EXCLUDED.is_admin
                    RETURNING id, email, name, is_admin
                    "#,
                )
                .bind(id)
                .bind(&entity.email)
                .bind(&entity.name)
                .bind(entity.is_admin)
                .fetch_one(&self.pool)
                .await
            }
        };

        let row = result.map_err(|e| map_write_error(e, &entity))?;

        Ok(row_to_entity(&row))
    }

    async fn delete(&self, filter: &UserFilter) -> Result<(), DomainError> {
        match filter {
            UserFilter::Id(id) => {
                sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(*id)
                    .execute(&self.pool)
                    .await
            }
            UserFilter::Email(email) => {
                sqlx::query("DELETE FROM users WHERE email = $1")
                    .bind(email)
                    .execute(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_entity(row: &PgRow) -> UserEntity {
    UserEntity {
        id: Some(row.get("id")),
        email: row.get("email"),
        name: row.get("name"),
        is_admin: row.get("is_admin"),
    }
}

fn map_write_error(error: sqlx::Error, entity: &UserEntity) -> DomainError {
    match error.as_database_error() {
        Some(db) if db.is_unique_violation() => unique_conflict(db.constraint(), entity),
        _ => DomainError::storage(format!("Failed to save user: {}", error)),
    }
}

/// Conflict message for the unique constraint a write tripped over
fn unique_conflict(constraint: Option<&str>, entity: &UserEntity) -> DomainError {
    match constraint {
        Some(EMAIL_CONSTRAINT) => {
            DomainError::conflict(format!("User with email '{}' already exists", entity.email))
        }
        Some(PRIMARY_KEY_CONSTRAINT) => match entity.id {
            Some(id) => DomainError::conflict(format!("User id {} is already in use", id)),
            None => DomainError::conflict("User id is already in use"),
        },
        Some(other) => DomainError::conflict(format!("Unique constraint '{}' violated", other)),
        None => DomainError::conflict("Unique constraint violated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/test")
            .with_max_connections(20)
            .with_min_connections(5)
            .with_connect_timeout(60)
            .with_idle_timeout(300);

        assert_eq!(config.url, "postgres://localhost/test");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout_secs, 60);
        assert_eq!(config.idle_timeout_secs, 300);
    }

    #[test]
    fn test_non_database_error_maps_to_storage() {
        let entity = UserEntity {
            id: None,
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            is_admin: false,
        };

        let error = map_write_error(sqlx::Error::RowNotFound, &entity);
        assert!(matches!(error, DomainError::Storage { .. }));
    }

    fn ada(id: Option<i64>) -> UserEntity {
        UserEntity {
            id,
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_email_constraint_conflict() {
        let error = unique_conflict(Some("users_email_key"), &ada(None));

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert_eq!(error.message(), "User with email 'ada@example.com' already exists");
    }

    #[test]
    fn test_primary_key_conflict_is_not_reported_as_email() {
        let error = unique_conflict(Some("users_pkey"), &ada(Some(7)));

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert_eq!(error.message(), "User id 7 is already in use");
    }

    #[test]
    fn test_unknown_constraint_conflict() {
        let error = unique_conflict(None, &ada(None));

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert!(!error.message().contains("email"));
    }
}
