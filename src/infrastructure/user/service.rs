//! User service: validated CRUD over a user store

use std::sync::Arc;

use tracing::debug;

use crate::domain::storage::Store;
use crate::domain::user::{
    NewUser, User, UserEntity, UserEntityFields, UserFilter, UserId, UserMapper, UserPatch,
    UserValidation,
};
use crate::domain::DomainError;

/// Separator placed between validation issues in a bad request message
pub const ISSUE_SEPARATOR: &str = ". \r\n";

const USER_NOT_FOUND: &str = "User not found";
const USER_ID_REQUIRED: &str = "User id is required";

/// User service for creating, reading, updating and deleting users
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<dyn Store<UserEntity>>,
    validation: UserValidation,
}

impl UserService {
    /// Create a new user service
    pub fn new(store: Arc<dyn Store<UserEntity>>) -> Self {
        let validation = UserValidation::new(Arc::clone(&store));
        Self { store, validation }
    }

    /// Validate and persist a new user
    pub async fn create_user(&self, request: NewUser) -> Result<User, DomainError> {
        let issues = self.validation.validate_new(&request).await?;

        if !issues.is_empty() {
            return Err(DomainError::bad_request(issues.join(ISSUE_SEPARATOR)));
        }

        let entity = self.store.create(UserEntityFields {
            email: request.email,
            name: request.name,
            is_admin: request.is_admin,
        });

        let saved = self.store.save(entity).await?;
        debug!(id = ?saved.id, "Created user");

        Ok(UserMapper::from_entity(saved))
    }

    /// All users, in store order
    pub async fn get_users(&self) -> Result<Vec<User>, DomainError> {
        let entities = self.store.find().await?;
        Ok(entities.into_iter().map(UserMapper::from_entity).collect())
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<User, DomainError> {
        self.find_one(UserFilter::Id(id.value())).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.find_one(UserFilter::Email(email.to_string())).await
    }

    /// Overlay the present patch fields onto `current` and persist the result
    ///
    /// No concurrency token is checked; the last writer wins.
    pub async fn update_user(&self, current: &User, patch: UserPatch) -> Result<User, DomainError> {
        if current.id.is_none() {
            return Err(DomainError::bad_request(USER_ID_REQUIRED));
        }

        let entity = UserMapper::to_entity(current);
        let patch_entity = UserMapper::patch_to_entity(&patch);

        let merged = self.store.merge(entity, patch_entity);
        let updated = self.store.save(merged).await?;
        debug!(id = ?updated.id, "Updated user");

        Ok(UserMapper::from_entity(updated))
    }

    /// Remove the stored row for `user`; a row that is already gone is not an error
    pub async fn delete_user(&self, user: &User) -> Result<(), DomainError> {
        let id = user
            .id
            .ok_or_else(|| DomainError::bad_request(USER_ID_REQUIRED))?;

        self.store.delete(&UserFilter::Id(id.value())).await?;
        debug!(id = %id, "Deleted user");

        Ok(())
    }

    /// Number of stored users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.store.count().await
    }

    async fn find_one(&self, filter: UserFilter) -> Result<User, DomainError> {
        self.store
            .find_one(&filter)
            .await?
            .map(UserMapper::from_entity)
            .ok_or_else(|| DomainError::bad_request(USER_NOT_FOUND))
    }
}
