//! Entity Store Library
//!
//! This crate provides generic entity repositories over a document store.
//! Repositories expose lookup by identifier and upsert, and turn every
//! store failure into a single database access error.

pub mod config;
pub mod infra;
pub mod repository;
pub mod store;

use std::sync::Arc;

use tracing::info;

use common::StoreError;

use crate::config::{EntityStoreConfig, StoreBackend};
use crate::infra::Database;
use crate::store::{DocumentStore, MemoryStore, PostgresDocumentStore};

pub use repository::{
    CrudRepository, DeleteRepository, DocumentRepository, EntityRepository, ReadRepository,
    WriteRepository,
};
pub use store::{Document, EntityDescriptor, TypedStore};

/// Open the document store selected by the configuration.
///
/// The postgres backend connects and applies pending migrations first.
pub async fn open_store(config: &EntityStoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            info!("Using PostgreSQL document store");
            Ok(Arc::new(PostgresDocumentStore::new(db.into_connection())))
        }
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = EntityStoreConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = EntityStoreConfig {
            backend: StoreBackend::Memory,
            ..EntityStoreConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        assert!(store.find_document("groups", "1").await.unwrap().is_none());
    }
}
