//! Generic repository over a document store.

use std::sync::Arc;

use async_trait::async_trait;

use common::{RepositoryError, RepositoryResult, StoreError};
use domain::{Entity, Identifier};

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use crate::store::{DocumentStore, EntityDescriptor, TypedStore};

/// Repository for any [`Entity`] backed by a [`DocumentStore`].
///
/// Holds nothing but the store handle and the entity descriptor, so one
/// instance can serve any number of concurrent callers. Every store failure
/// is returned as [`RepositoryError::DatabaseAccess`].
pub struct DocumentRepository<T: Entity> {
    store: Arc<dyn DocumentStore>,
    descriptor: EntityDescriptor<T>,
}

impl<T: Entity> DocumentRepository<T> {
    /// Create new repository instance
    pub fn new(store: Arc<dyn DocumentStore>, descriptor: EntityDescriptor<T>) -> Self {
        Self { store, descriptor }
    }

    /// Create a repository storing `T` in its default collection
    pub fn for_entity(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, EntityDescriptor::new())
    }

    fn access_failure(&self, operation: &'static str, err: StoreError) -> RepositoryError {
        tracing::error!(
            operation,
            collection = %self.descriptor.collection(),
            kind = %err.kind(),
            "Document store failure: {}",
            err
        );
        RepositoryError::from(err)
    }
}

impl<T: Entity> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            descriptor: self.descriptor.clone(),
        }
    }
}

#[async_trait]
impl<T: Entity> ReadRepository<T, T::Id> for DocumentRepository<T> {
    fn entity_name(&self) -> &str {
        self.descriptor.type_name()
    }

    async fn find_by_id(&self, id: &T::Id) -> RepositoryResult<Option<T>> {
        let key = id.to_key();
        let found = self
            .store
            .fetch(&self.descriptor, &key)
            .await
            .map_err(|e| self.access_failure("find_by_id", e))?;

        tracing::debug!(
            collection = %self.descriptor.collection(),
            id = %key,
            found = found.is_some(),
            "Document lookup"
        );
        Ok(found)
    }
}

#[async_trait]
impl<T: Entity> WriteRepository<T> for DocumentRepository<T> {
    async fn save(&self, entity: T) -> RepositoryResult<T> {
        let saved = self
            .store
            .upsert(&self.descriptor, &entity)
            .await
            .map_err(|e| self.access_failure("save", e))?;

        tracing::debug!(collection = %self.descriptor.collection(), "Document saved");
        Ok(saved)
    }
}

#[async_trait]
impl<T: Entity> DeleteRepository<T::Id> for DocumentRepository<T> {
    async fn delete_by_id(&self, id: &T::Id) -> RepositoryResult<bool> {
        let key = id.to_key();
        let deleted = self
            .store
            .delete_document(self.descriptor.collection(), &key)
            .await
            .map_err(|e| self.access_failure("delete_by_id", e))?;

        tracing::debug!(
            collection = %self.descriptor.collection(),
            id = %key,
            deleted,
            "Document delete"
        );
        Ok(deleted)
    }
}
