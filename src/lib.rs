//! User Service
//!
//! A small user-management service: validated creation, lookup by id or
//! email, partial updates and deletion, served over HTTP and backed by an
//! in-memory or Postgres record store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StoreFactory;
use infrastructure::user::UserService;
use tracing::info;

/// Create the application state with the default (in-memory) configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = config.storage.to_storage_config()?;
    let store = StoreFactory::create_user_store(&storage).await?;

    info!(backend = ?storage.storage_type(), "User store ready");

    Ok(AppState::new(UserService::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;

    #[tokio::test]
    async fn test_create_app_state_defaults_to_memory() {
        let state = create_app_state().await.unwrap();

        let user = state
            .user_service
            .create_user(NewUser::new("ada@example.com", "Ada", false))
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert_eq!(state.user_service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_app_state_rejects_unknown_backend() {
        let mut config = AppConfig::default();
        config.storage.backend = "mongo".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
