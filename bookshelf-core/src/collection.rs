//! Typed collection views over a storage backend.
//!
//! A [`TypedCollection`] binds a document type to a named collection and
//! handles BSON conversion at the edge, so callers work with their own
//! structs rather than raw BSON documents.

use bson::{Bson, Uuid};
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    document::{Document, DocumentExt},
    error::StoreResult,
    query::Query,
};

/// A type-safe collection view for a specific document type.
///
/// Obtained from [`DocumentStore::typed_collection`](crate::store::DocumentStore::typed_collection);
/// borrows the backend for the duration of its use.
#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, D: Document> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<D>,
}

impl<'a, B: StoreBackend, D: Document> TypedCollection<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts new documents into the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization or
    /// insertion fails, including unique-index violations.
    pub async fn insert(&self, documents: Vec<D>) -> StoreResult<()> {
        Ok(self
            .backend
            .insert_documents(
                documents
                    .into_iter()
                    .map(|d| {
                        d.to_bson()
                            .map(move |b| (d.id().clone(), b))
                    })
                    .collect::<Result<Vec<(Uuid, Bson)>, _>>()?,
                self.name(),
            )
            .await?)
    }

    /// Replaces existing documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization or
    /// replacement fails.
    pub async fn update(&self, documents: Vec<D>) -> StoreResult<()> {
        Ok(self
            .backend
            .update_documents(
                documents
                    .into_iter()
                    .map(|d| {
                        d.to_bson()
                            .map(move |b| (d.id().clone(), b))
                    })
                    .collect::<Result<Vec<(Uuid, Bson)>, _>>()?,
                self.name(),
            )
            .await?)
    }

    /// Deletes documents from the collection by their IDs.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn delete<U>(&self, ids: Vec<U>) -> StoreResult<()>
    where
        U: Into<Uuid> + Send + Sync + 'static,
    {
        Ok(self
            .backend
            .delete_documents(
                ids.into_iter()
                    .map(Into::into)
                    .collect(),
                self.name(),
            )
            .await?)
    }

    /// Retrieves documents from the collection by their IDs.
    ///
    /// Missing IDs are omitted from the results.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if deserialization or
    /// retrieval fails.
    pub async fn get<U>(&self, ids: Vec<U>) -> StoreResult<Vec<D>>
    where
        U: Into<Uuid> + Send + Sync + 'static,
    {
        Ok(self
            .backend
            .get_documents(
                ids.into_iter()
                    .map(Into::into)
                    .collect(),
                self.name(),
            )
            .await?
            .into_iter()
            .map(|doc| D::from_bson(doc))
            .collect::<Result<Vec<D>, _>>()?)
    }

    /// Queries documents in the collection using a structured query.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if deserialization or
    /// the query fails.
    pub async fn query(&self, query: Query) -> StoreResult<Vec<D>> {
        Ok(self
            .backend
            .query_documents(query, self.name())
            .await?
            .into_iter()
            .map(|doc| D::from_bson(doc))
            .collect::<Result<Vec<D>, _>>()?)
    }
}
