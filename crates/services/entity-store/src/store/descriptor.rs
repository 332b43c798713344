//! Entity type descriptor.

use std::marker::PhantomData;

use serde_json::Value;

use common::{StoreError, StoreResult};
use domain::Entity;

use super::Document;

/// Type metadata a repository hands to its store client.
///
/// Names the collection an entity lives in and converts between the entity
/// and its raw document. Fixed at construction; cloning is cheap.
pub struct EntityDescriptor<T> {
    collection: String,
    type_name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityDescriptor<T> {
    /// Describe `T` stored in its default collection
    pub fn new() -> Self {
        Self {
            collection: T::COLLECTION.to_string(),
            type_name: short_type_name::<T>(),
            _marker: PhantomData,
        }
    }

    /// Store `T` in another collection
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Unqualified name of `T`, e.g. `Group`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Deserialize a raw document as `T`
    pub fn decode(&self, document: Document) -> StoreResult<T> {
        serde_json::from_value(Value::Object(document)).map_err(|e| {
            StoreError::malformed(format!(
                "Cannot read {} from collection {}: {}",
                self.type_name, self.collection, e
            ))
        })
    }

    /// Serialize `T` into a raw document
    pub fn encode(&self, entity: &T) -> StoreResult<Document> {
        match serde_json::to_value(entity)? {
            Value::Object(document) => Ok(document),
            other => Err(StoreError::malformed(format!(
                "{} must serialize to a document, got {}",
                self.type_name, other
            ))),
        }
    }
}

impl<T: Entity> Default for EntityDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EntityDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            type_name: self.type_name,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for EntityDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("collection", &self.collection)
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Group {
        #[serde(rename = "_id")]
        id: Option<String>,
        name: String,
    }

    impl Entity for Group {
        type Id = String;
        const COLLECTION: &'static str = "groups";
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Counter(u64);

    impl Entity for Counter {
        type Id = u64;
    }

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = EntityDescriptor::<Group>::new();
        assert_eq!(descriptor.collection(), "groups");
        assert_eq!(descriptor.type_name(), "Group");
    }

    #[test]
    fn test_descriptor_collection_override() {
        let descriptor = EntityDescriptor::<Group>::new().with_collection("archived_groups");
        assert_eq!(descriptor.collection(), "archived_groups");
        assert_eq!(descriptor.clone().collection(), "archived_groups");
    }

    #[test]
    fn test_encode_then_decode() {
        let descriptor = EntityDescriptor::<Group>::new();
        let group = Group {
            id: Some("g-1".to_string()),
            name: "rustaceans".to_string(),
        };

        let document = descriptor.encode(&group).unwrap();
        assert_eq!(document["_id"], json!("g-1"));
        assert_eq!(descriptor.decode(document).unwrap(), group);
    }

    #[test]
    fn test_decode_malformed_document() {
        let descriptor = EntityDescriptor::<Group>::new();
        let mut document = Document::new();
        document.insert("_id".to_string(), json!("g-1"));
        document.insert("name".to_string(), json!(12));

        let err = descriptor.decode(document).unwrap_err();
        assert_eq!(err.kind(), common::StoreErrorKind::Malformed);
        assert!(err.message().contains("Group"));
        assert!(err.message().contains("groups"));
    }

    #[test]
    fn test_encode_rejects_non_documents() {
        let descriptor = EntityDescriptor::<Counter>::new();
        let err = descriptor.encode(&Counter(3)).unwrap_err();
        assert_eq!(err.kind(), common::StoreErrorKind::Malformed);
    }
}
