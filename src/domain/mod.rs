//! Domain layer - User records, validation, and the storage port

pub mod error;
pub mod storage;
pub mod user;

pub use error::{DomainError, HttpCode};
pub use storage::{EntityFilter, EntityId, StorageEntity, Store};
pub use user::{
    NewUser, User, UserEntity, UserFilter, UserId, UserMapper, UserPatch, UserValidation,
    UserValidationError,
};
