//! Conversions between user records and user rows

use super::entity::{UserEntity, UserEntityPatch};
use super::record::{User, UserId, UserPatch};

/// Field-for-field conversions; nothing is validated or defaulted here
#[derive(Debug, Clone, Copy)]
pub struct UserMapper;

impl UserMapper {
    pub fn from_entity(entity: UserEntity) -> User {
        User {
            id: entity.id.map(UserId::new),
            email: entity.email,
            name: entity.name,
            is_admin: entity.is_admin,
        }
    }

    pub fn to_entity(user: &User) -> UserEntity {
        UserEntity {
            id: user.id.map(|id| id.value()),
            email: user.email.clone(),
            name: user.name.clone(),
            is_admin: user.is_admin,
        }
    }

    pub fn patch_to_entity(patch: &UserPatch) -> UserEntityPatch {
        UserEntityPatch {
            email: patch.email.clone(),
            name: patch.name.clone(),
            is_admin: patch.is_admin,
        }
    }
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        UserMapper::from_entity(entity)
    }
}

impl From<&User> for UserEntity {
    fn from(user: &User) -> Self {
        UserMapper::to_entity(user)
    }
}
