//! Entity Store - admin commands for the document store.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::RepositoryError;
use entity_store_lib::config::EntityStoreConfig;
use entity_store_lib::infra::Database;
use entity_store_lib::store::DocumentStore;
use entity_store_lib::{Document, MigrateAction};

#[derive(Parser)]
#[command(name = "entity-store")]
#[command(about = "Document store administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Check database connectivity
    Ping,
    /// Print a stored document
    Get {
        #[arg(long)]
        collection: String,
        #[arg(long)]
        id: String,
    },
    /// Insert or overwrite a document given as JSON
    Put {
        #[arg(long)]
        collection: String,
        #[arg(long)]
        document: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            entity_store_lib::run_migrations(migrate_action).await?;
        }
        Commands::Ping => {
            let config = EntityStoreConfig::from_env();
            let db = Database::connect_without_migrations(&config.database).await?;
            db.ping().await?;
            info!("Database is reachable");
        }
        Commands::Get { collection, id } => {
            check_collection(&collection)?;
            let store = entity_store_lib::open_store(&EntityStoreConfig::from_env()).await?;

            let document = store
                .find_document(&collection, &id)
                .await
                .map_err(RepositoryError::from)?;
            match document {
                Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
                None => return Err(RepositoryError::not_found(collection, id).into()),
            }
        }
        Commands::Put {
            collection,
            document,
        } => {
            check_collection(&collection)?;
            let document: Document = serde_json::from_str(&document)?;
            let store = entity_store_lib::open_store(&EntityStoreConfig::from_env()).await?;

            let saved = store
                .upsert_document(&collection, document)
                .await
                .map_err(RepositoryError::from)?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
    }

    Ok(())
}

fn check_collection(collection: &str) -> Result<(), String> {
    if domain::is_valid_collection(collection) {
        Ok(())
    } else {
        Err(format!("Invalid collection name: {:?}", collection))
    }
}
