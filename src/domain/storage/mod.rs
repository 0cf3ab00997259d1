//! Storage domain - Generic record store abstraction

mod entity;
mod repository;

pub use entity::{EntityFilter, EntityId, StorageEntity};
pub use repository::Store;

#[cfg(test)]
pub use repository::mock;

#[cfg(test)]
pub(crate) use entity::test_entity;
