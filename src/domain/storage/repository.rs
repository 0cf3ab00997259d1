//! Store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic record store consumed by services
///
/// `create` and `merge` are pure shape operations; only `find`, `find_one`,
/// `save` and `delete` touch the backing storage.
#[async_trait]
pub trait Store<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Builds a new unsaved entity from its fields
    fn create(&self, fields: E::Fields) -> E {
        E::from_fields(fields)
    }

    /// Retrieves all entities in store-defined order
    async fn find(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves the first entity matching the filter
    async fn find_one(&self, filter: &E::Filter) -> Result<Option<E>, DomainError>;

    /// Overlays the present fields of `source` onto `target`
    fn merge(&self, mut target: E, source: E::Patch) -> E {
        target.apply(source);
        target
    }

    /// Persists an entity, assigning an id when it has none
    async fn save(&self, entity: E) -> Result<E, DomainError>;

    /// Removes every entity matching the filter; missing rows are not an error
    async fn delete(&self, filter: &E::Filter) -> Result<(), DomainError>;

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.find().await?.len())
    }
}
