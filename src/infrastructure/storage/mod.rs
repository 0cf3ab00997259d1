//! Storage infrastructure - Store implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageType, StoreFactory};
pub use in_memory::InMemoryStore;
pub use postgres::{PostgresConfig, PostgresUserStore};
