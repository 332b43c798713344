//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::StoreResult;

use super::{document_key, Document, DocumentStore};

type Collection = HashMap<String, Document>;

/// Process-local store keeping every collection in memory.
///
/// Safe to share between tasks; all access goes through one lock.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Collection::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn upsert_document(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        let key = document_key(&mut document)?;

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key, document.clone());

        Ok(document)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|documents| documents.remove(id).is_some()))
    }
}
