//! Server entry point: configuration, store selection, and the listen loop.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bookshelf_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    store::DocumentStore,
};
use bookshelf_memory::InMemoryStore;
use bookshelf_mongodb::MongoDbStore;
use bookshelf_server::{
    api::{self, AppState},
    config::Config,
    error,
    models::Book,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    error::expose_internal_errors(config.environment.is_development());

    match config.mongodb_uri.clone() {
        Some(uri) => {
            let backend = MongoDbStore::builder(&uri, &config.database)
                .build()
                .await
                .context("failed to build the MongoDB client")?;
            info!(database = %config.database, "using the MongoDB store");

            serve(backend, &config).await
        }
        None => {
            warn!("MONGODB_URI is not set; using the in-memory store, data will not survive a restart");

            serve(InMemoryStore::new(), &config).await
        }
    }
}

async fn serve<B: StoreBackend + 'static>(backend: B, config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(DocumentStore::new(backend));

    // ISBNs are globally unique across the catalog
    store
        .add_index(Book::collection_name(), "isbn", true)
        .await
        .context("failed to create the unique isbn index")?;

    let app = api::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
