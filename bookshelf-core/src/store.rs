//! Main document store interface tying a backend to typed collections.

use crate::{
    backend::StoreBackend,
    collection::TypedCollection,
    document::Document,
    error::StoreResult,
};

/// A document store bound to a specific backend implementation.
///
/// The store is the single shared handle to the storage layer; construct one at
/// startup and pass it (behind an `Arc`) to every component that needs storage
/// access. Tests substitute an in-memory backend through the same interface.
///
/// # Example
///
/// ```ignore
/// let store = DocumentStore::new(backend);
/// let books = store.typed_collection::<Book>();
/// ```
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Gets a typed collection for the specified document type.
    ///
    /// The collection name is determined by the document type's `collection_name()` method.
    pub fn typed_collection<'a, D: Document>(&'a self) -> TypedCollection<'a, B, D> {
        TypedCollection::new(D::collection_name().to_string(), &self.backend)
    }

    /// Adds an index to a field in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if index creation fails.
    pub async fn add_index(
        &self,
        collection: &str,
        field: &str,
        unique: bool,
    ) -> StoreResult<()> {
        self.backend
            .add_index(collection, field, unique)
            .await
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// This consumes the store and should be called when no longer needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown operation fails.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}
