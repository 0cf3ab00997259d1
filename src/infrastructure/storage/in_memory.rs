//! In-memory store implementation

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{EntityFilter, EntityId, StorageEntity, Store};
use crate::domain::DomainError;

#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<EntityId, E>,
    next_id: EntityId,
}

/// Thread-safe in-memory store
///
/// Rows are kept in id order and the entity's unique values are enforced on
/// save, mirroring a table with unique constraints. Data is lost when the
/// process terminates.
#[derive(Debug)]
pub struct InMemoryStore<E>
where
    E: StorageEntity,
{
    table: RwLock<Table<E>>,
}

impl<E> Default for InMemoryStore<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStore<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

fn find_unique_violation<E: StorageEntity>(
    rows: &BTreeMap<EntityId, E>,
    entity: &E,
) -> Option<(&'static str, String)> {
    let own_id = entity.id();

    entity.unique_values().into_iter().find(|(column, value)| {
        rows.values().any(|other| {
            other.id() != own_id
                && other
                    .unique_values()
                    .iter()
                    .any(|(c, v)| c == column && v == value)
        })
    })
}

#[async_trait]
impl<E> Store<E> for InMemoryStore<E>
where
    E: StorageEntity + 'static,
{
    async fn find(&self) -> Result<Vec<E>, DomainError> {
        let table = self
            .table
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn find_one(&self, filter: &E::Filter) -> Result<Option<E>, DomainError> {
        let table = self
            .table
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.values().find(|e| filter.matches(e)).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E, DomainError> {
        let mut table = self
            .table
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some((column, value)) = find_unique_violation(&table.rows, &entity) {
            return Err(DomainError::conflict(format!(
                "Duplicate value '{}' for unique column '{}'",
                value, column
            )));
        }

        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = table.next_id;
                entity.set_id(id);
                id
            }
        };

        table.next_id = table.next_id.max(id + 1);
        table.rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, filter: &E::Filter) -> Result<(), DomainError> {
        let mut table = self
            .table
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        table.rows.retain(|_, e| !filter.matches(e));
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let table = self
            .table
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.len())
    }
}
