//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide a foundation for all repositories with common
//! lookup, save and delete operations that can be composed as needed.

use async_trait::async_trait;

use common::{OptionExt, RepositoryResult};
use domain::Identifier;

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<T, ID>: Send + Sync
where
    T: Send + 'static,
    ID: Identifier,
{
    /// Name of the entity type, used in not-found errors
    fn entity_name(&self) -> &str;

    /// Find entity by identifier. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: &ID) -> RepositoryResult<Option<T>>;

    /// Find entity by identifier, treating absence as `DocumentNotFound`
    async fn find_by_id_or_not_found(&self, id: &ID) -> RepositoryResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_not_found(self.entity_name(), id)
    }

    /// Check whether an entity exists
    async fn exists_by_id(&self, id: &ID) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Insert or overwrite an entity, returning it as persisted
    async fn save(&self, entity: T) -> RepositoryResult<T>;

    /// Save entities one after another, stopping at the first failure
    async fn save_all(&self, entities: Vec<T>) -> RepositoryResult<Vec<T>> {
        let mut saved = Vec::with_capacity(entities.len());
        for entity in entities {
            saved.push(self.save(entity).await?);
        }
        Ok(saved)
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<ID>: Send + Sync
where
    ID: Identifier,
{
    /// Delete entity by identifier. Returns true if it existed.
    async fn delete_by_id(&self, id: &ID) -> RepositoryResult<bool>;
}

/// Entity repository - lookup by identifier plus upsert
pub trait EntityRepository<T, ID>: ReadRepository<T, ID> + WriteRepository<T>
where
    T: Send + 'static,
    ID: Identifier,
{
}

// Auto-implement EntityRepository for types implementing read and write
impl<R, T, ID> EntityRepository<T, ID> for R
where
    R: ReadRepository<T, ID> + WriteRepository<T>,
    T: Send + 'static,
    ID: Identifier,
{
}

/// Full CRUD repository - Combines all operations
/// Follows Open/Closed Principle: extend by implementing individual traits
pub trait CrudRepository<T, ID>: EntityRepository<T, ID> + DeleteRepository<ID>
where
    T: Send + 'static,
    ID: Identifier,
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<R, T, ID> CrudRepository<T, ID> for R
where
    R: EntityRepository<T, ID> + DeleteRepository<ID>,
    T: Send + 'static,
    ID: Identifier,
{
}
