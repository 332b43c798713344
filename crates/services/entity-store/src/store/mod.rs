//! Store client layer - Raw document storage.
//!
//! A store client knows how to fetch, upsert and delete JSON documents by
//! collection and key. It owns identity generation: a document saved without
//! an `_id` gets a fresh UUID. Typed access on top of raw documents is
//! provided by [`TypedStore`] for every store client.

mod descriptor;
pub mod entities;
mod memory;
mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use common::{StoreError, StoreResult};
use domain::{Entity, ID_FIELD};

pub use descriptor::EntityDescriptor;
pub use memory::MemoryStore;
pub use postgres::PostgresDocumentStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Raw storage record: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Document store client trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `id`, if any
    async fn find_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert or overwrite a document, returning it as stored
    async fn upsert_document(&self, collection: &str, document: Document) -> StoreResult<Document>;

    /// Remove the document stored under `id`. Returns true if it existed.
    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool>;
}

/// Typed access to a document store.
///
/// Auto-implemented for every [`DocumentStore`]; the descriptor tells the
/// store which collection to use and how to decode records.
#[async_trait]
pub trait TypedStore: DocumentStore {
    /// Fetch by identifier, deserializing as `T`
    async fn fetch<T: Entity>(
        &self,
        descriptor: &EntityDescriptor<T>,
        id: &str,
    ) -> StoreResult<Option<T>> {
        self.find_document(descriptor.collection(), id)
            .await?
            .map(|document| descriptor.decode(document))
            .transpose()
    }

    /// Upsert an entity instance, returning it as recorded by the store.
    ///
    /// The key is assigned and the keyed document checked against `T` before
    /// anything is written, so an entity whose id cannot hold a generated key
    /// fails without leaving a record behind.
    async fn upsert<T: Entity>(&self, descriptor: &EntityDescriptor<T>, entity: &T) -> StoreResult<T> {
        let mut document = descriptor.encode(entity)?;
        document_key(&mut document)?;
        descriptor.decode(document.clone())?;

        let stored = self.upsert_document(descriptor.collection(), document).await?;
        descriptor.decode(stored)
    }
}

impl<S: DocumentStore + ?Sized> TypedStore for S {}

/// Resolve the key of a document about to be stored.
///
/// A missing or null `_id` is replaced by a generated UUID.
pub(crate) fn document_key(document: &mut Document) -> StoreResult<String> {
    match document.get(ID_FIELD) {
        None | Some(Value::Null) => {
            let id = Uuid::new_v4().to_string();
            document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(other) => Err(StoreError::malformed(format!(
            "Unsupported document identifier: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn test_document_key_generates_missing_id() {
        let mut document = doc(json!({ "name": "a" }));
        let key = document_key(&mut document).unwrap();

        assert!(Uuid::parse_str(&key).is_ok());
        assert_eq!(document[ID_FIELD], Value::String(key));
    }

    #[test]
    fn test_document_key_replaces_null_id() {
        let mut document = doc(json!({ "_id": null, "name": "a" }));
        let key = document_key(&mut document).unwrap();

        assert_eq!(document[ID_FIELD], Value::String(key));
    }

    #[test]
    fn test_document_key_keeps_existing_id() {
        let mut document = doc(json!({ "_id": "42" }));
        assert_eq!(document_key(&mut document).unwrap(), "42");

        let mut numeric = doc(json!({ "_id": 7 }));
        assert_eq!(document_key(&mut numeric).unwrap(), "7");
        assert_eq!(numeric[ID_FIELD], json!(7));
    }

    #[test]
    fn test_document_key_rejects_unsupported_ids() {
        let mut empty = doc(json!({ "_id": "" }));
        assert!(document_key(&mut empty).is_err());

        let mut nested = doc(json!({ "_id": { "oid": "x" } }));
        let err = document_key(&mut nested).unwrap_err();
        assert_eq!(err.kind(), common::StoreErrorKind::Malformed);
    }
}
