//! Storage entity traits and types

use std::fmt::Debug;

/// Identifier type assigned by stores on first save
pub type EntityId = i64;

/// Selection criteria understood by a store for one entity type
pub trait EntityFilter<E>: Clone + Debug + Send + Sync {
    /// Returns true when the entity satisfies the filter
    fn matches(&self, entity: &E) -> bool;
}

/// Trait for types that can be persisted through a [`Store`](super::Store)
pub trait StorageEntity: Clone + Debug + Send + Sync {
    /// Field set used to build a new, unsaved entity
    type Fields: Send;

    /// Partial field set overlaid onto an entity by `merge`
    type Patch: Send;

    /// Filter type accepted by `find_one` and `delete`
    type Filter: EntityFilter<Self>;

    /// Builds an unsaved entity (no id) from its fields
    fn from_fields(fields: Self::Fields) -> Self;

    /// Returns the store-assigned id, if the entity has been saved
    fn id(&self) -> Option<EntityId>;

    /// Sets the id; only stores call this, on first save
    fn set_id(&mut self, id: EntityId);

    /// Overlays the present fields of `patch` onto `self`
    fn apply(&mut self, patch: Self::Patch);

    /// Column/value pairs that must be unique across all stored entities
    fn unique_values(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
