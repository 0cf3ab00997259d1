//! User validation utilities

use std::sync::Arc;

use thiserror::Error;
use validator::ValidateEmail;

use super::entity::{UserEntity, UserFilter};
use super::record::NewUser;
use crate::domain::storage::Store;
use crate::domain::DomainError;

/// Problems found in a new user request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Email '{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Name is required")]
    EmptyName,

    #[error("A user with email '{0}' already exists")]
    EmailTaken(String),
}

/// Validate the shape of an email address
///
/// Rules:
/// - Cannot be empty or whitespace
/// - Must be a structurally valid address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a display name; whitespace-only names count as empty
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    Ok(())
}

/// Checks new user requests against format and uniqueness rules
#[derive(Debug, Clone)]
pub struct UserValidation {
    store: Arc<dyn Store<UserEntity>>,
}

impl UserValidation {
    pub fn new(store: Arc<dyn Store<UserEntity>>) -> Self {
        Self { store }
    }

    /// Returns every issue found in the request; an empty list means valid.
    ///
    /// The uniqueness lookup is advisory: a concurrent create can still slip
    /// between this check and the save, so the store's unique constraint
    /// remains the enforcement point.
    pub async fn validate_new(&self, request: &NewUser) -> Result<Vec<String>, DomainError> {
        let mut issues = Vec::new();

        if let Err(e) = validate_email(&request.email) {
            issues.push(e.to_string());
        }

        if let Err(e) = validate_name(&request.name) {
            issues.push(e.to_string());
        }

        if !request.email.trim().is_empty() {
            let existing = self
                .store
                .find_one(&UserFilter::Email(request.email.clone()))
                .await?;

            if existing.is_some() {
                issues.push(UserValidationError::EmailTaken(request.email.clone()).to_string());
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStore;
    use crate::domain::user::entity::UserEntityFields;
    use crate::domain::storage::StorageEntity;

    fn stored(email: &str) -> UserEntity {
        UserEntity::from_fields(UserEntityFields {
            email: email.to_string(),
            name: "Existing".to_string(),
            is_admin: false,
        })
    }

    async fn validation_with(emails: &[&str]) -> UserValidation {
        let store = MockStore::<UserEntity>::new();

        for email in emails {
            store.save(stored(email)).await.unwrap();
        }

        UserValidation::new(Arc::new(store))
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(validate_email("   "), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserValidationError::InvalidEmail("not-an-email".to_string()))
        );
        assert!(validate_email("missing@").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Ada").is_ok());
        assert_eq!(validate_name(""), Err(UserValidationError::EmptyName));
        assert_eq!(validate_name(" \t"), Err(UserValidationError::EmptyName));
    }

    #[tokio::test]
    async fn test_validate_new_accepts_fresh_request() {
        let validation = validation_with(&["other@example.com"]).await;

        let issues = validation
            .validate_new(&NewUser::new("ada@example.com", "Ada", false))
            .await
            .unwrap();

        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_validate_new_reports_taken_email() {
        let validation = validation_with(&["ada@example.com"]).await;

        let issues = validation
            .validate_new(&NewUser::new("ada@example.com", "Ada", false))
            .await
            .unwrap();

        assert_eq!(
            issues,
            vec!["A user with email 'ada@example.com' already exists".to_string()]
        );
    }

    #[tokio::test]
    async fn test_validate_new_collects_every_issue() {
        let validation = validation_with(&[]).await;

        let issues = validation
            .validate_new(&NewUser::new("nope", "", true))
            .await
            .unwrap();

        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("not a valid email"));
        assert_eq!(issues[1], "Name is required");
    }

    #[tokio::test]
    async fn test_validate_new_skips_lookup_for_blank_email() {
        let store = MockStore::<UserEntity>::new().with_error("store must not be queried");
        let validation = UserValidation::new(Arc::new(store));

        let issues = validation
            .validate_new(&NewUser::new("", "Ada", false))
            .await
            .unwrap();

        assert_eq!(issues, vec!["Email is required".to_string()]);
    }

    #[tokio::test]
    async fn test_validate_new_propagates_store_failure() {
        let store = MockStore::<UserEntity>::new().with_error("connection reset");
        let validation = UserValidation::new(Arc::new(store));

        let result = validation
            .validate_new(&NewUser::new("ada@example.com", "Ada", false))
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
