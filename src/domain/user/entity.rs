//! Storage-facing user types

use serde::{Deserialize, Serialize};

use crate::domain::storage::{EntityFilter, EntityId, StorageEntity};

/// User row as persisted by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
    pub id: Option<EntityId>,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

/// Fields for a new, unsaved user row
#[derive(Debug, Clone)]
pub struct UserEntityFields {
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

/// Present fields overwrite the stored row on merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEntityPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_admin: Option<bool>,
}

/// Lookup criteria for user rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(EntityId),
    Email(String),
}

impl EntityFilter<UserEntity> for UserFilter {
    fn matches(&self, entity: &UserEntity) -> bool {
        match self {
            Self::Id(id) => entity.id == Some(*id),
            Self::Email(email) => entity.email == *email,
        }
    }
}

impl StorageEntity for UserEntity {
    type Fields = UserEntityFields;
    type Patch = UserEntityPatch;
    type Filter = UserFilter;

    fn from_fields(fields: Self::Fields) -> Self {
        Self {
            id: None,
            email: fields.email,
            name: fields.name,
            is_admin: fields.is_admin,
        }
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(email) = patch.email {
            self.email = email;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(is_admin) = patch.is_admin {
            self.is_admin = is_admin;
        }
    }

    fn unique_values(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.clone())]
    }
}
