//! User domain
//!
//! Record and row shapes for users, the mapper between them, and the
//! validation applied before a user is created.

mod entity;
mod mapper;
mod record;
mod validation;

pub use entity::{UserEntity, UserEntityFields, UserEntityPatch, UserFilter};
pub use mapper::UserMapper;
pub use record::{NewUser, User, UserId, UserPatch};
pub use validation::{validate_email, validate_name, UserValidation, UserValidationError};
