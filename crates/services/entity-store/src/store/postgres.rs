//! PostgreSQL document store.
//!
//! Documents are kept as JSONB rows keyed by `(collection, id)`.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::Value;

use common::{StoreError, StoreResult};

use super::entities::document::{self, ActiveModel, Entity as DocumentEntity};
use super::{document_key, Document, DocumentStore};

/// Concrete implementation of DocumentStore over a SeaORM connection
pub struct PostgresDocumentStore {
    db: DatabaseConnection,
}

impl PostgresDocumentStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let model = DocumentEntity::find_by_id((collection.to_string(), id.to_string()))
            .one(&self.db)
            .await?;

        model.map(into_document).transpose()
    }

    async fn upsert_document(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        let id = document_key(&mut document)?;
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            collection: Set(collection.to_string()),
            id: Set(id),
            body: Set(Value::Object(document)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Existing rows keep their created_at
        let model = DocumentEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([document::Column::Collection, document::Column::Id])
                    .update_columns([document::Column::Body, document::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        into_document(model)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = DocumentEntity::delete_by_id((collection.to_string(), id.to_string()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert a stored row back into a document
fn into_document(model: document::Model) -> StoreResult<Document> {
    match model.body {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::malformed(format!(
            "Stored body of {}/{} is not a document: {}",
            model.collection, model.id, other
        ))),
    }
}
