//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait provides a unified async interface for all storage
//! operations: document insertion, replacement, deletion, retrieval, querying,
//! and index management. Implementations are required to be thread-safe
//! (`Send + Sync`) and support concurrent access.

use async_trait::async_trait;
use bson::{Bson, Uuid};
use std::fmt::Debug;

use crate::{error::StoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// Implementers provide concrete storage strategies for documents, from a simple
/// in-memory map to a remote database. Single-document writes are atomic; no
/// operation spans collections.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from
/// multiple async tasks. The exact concurrency model (mutex-based, read-write
/// locks, driver-internal pooling) is implementation-specific.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). Implementers
/// should document which error variants each operation may produce.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts new documents into a collection.
    ///
    /// The collection is created automatically if it doesn't exist. Inserting a
    /// document whose ID is already present fails with
    /// [`StoreError::DocumentExists`](crate::error::StoreError::DocumentExists);
    /// inserting a document that duplicates a value under a unique index fails
    /// with [`StoreError::UniqueViolation`](crate::error::StoreError::UniqueViolation).
    async fn insert_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> StoreResult<()>;

    /// Replaces existing documents in a collection.
    ///
    /// Each document is replaced in full; fields absent from the replacement do
    /// not survive. Replacing a document whose ID is not present fails with
    /// [`StoreError::DocumentNotFound`](crate::error::StoreError::DocumentNotFound),
    /// and a replacement that duplicates a value under a unique index fails with
    /// [`StoreError::UniqueViolation`](crate::error::StoreError::UniqueViolation).
    async fn update_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> StoreResult<()>;

    /// Deletes documents from a collection by their IDs.
    ///
    /// Deleting an ID that is not present fails with
    /// [`StoreError::DocumentNotFound`](crate::error::StoreError::DocumentNotFound).
    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> StoreResult<()>;

    /// Retrieves documents from a collection by their IDs.
    ///
    /// Missing IDs are silently omitted from the results; retrieval is never an
    /// error for an absent document.
    async fn get_documents(
        &self,
        ids: Vec<Uuid>,
        collection: &str,
    ) -> StoreResult<Vec<Bson>>;

    /// Queries documents in a collection using a structured query.
    ///
    /// Applies the query's filter expression, sorting, offset, and limit to
    /// select matching documents.
    ///
    /// # See Also
    ///
    /// - [`Query`] for constructing queries
    /// - [`crate::query::Filter`] for building filter expressions
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> StoreResult<Vec<Bson>>;

    /// Creates an index on a field in a collection.
    ///
    /// When `unique` is true the index enforces uniqueness of the field's value
    /// across the collection; subsequent conflicting writes fail with
    /// [`StoreError::UniqueViolation`](crate::error::StoreError::UniqueViolation).
    /// Non-unique indexes are advisory and may be a no-op for backends without
    /// native indexing.
    async fn add_index(
        &self,
        collection: &str,
        field: &str,
        unique: bool,
    ) -> StoreResult<()>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// Backends holding connections or other external resources should
    /// override this; the default implementation is a no-op.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
