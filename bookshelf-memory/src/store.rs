//! In-memory storage implementation for document stores.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use bson::{Bson, Uuid};
use mea::rwlock::RwLock;

use bookshelf_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Query, SortDirection},
};

use crate::evaluator::{Comparable, DocumentEvaluator};

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// Implements [`StoreBackend`] entirely in memory using async-aware read-write
/// locks. Documents are stored as BSON values indexed by their UUID.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same
/// instance share the same underlying data.
///
/// # Unique Indexes
///
/// Unique indexes registered through `add_index` are enforced on insert and
/// update by scanning the collection. Null and missing field values are exempt
/// from the uniqueness check.
///
/// # Performance
///
/// Queries scan all documents in a collection. For small to medium datasets
/// this is typically acceptable; larger deployments should use a persistent
/// backend.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// The main storage map: collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
    /// Unique-indexed field names per collection
    unique_indexes: Arc<RwLock<HashMap<String, BTreeSet<String>>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
            unique_indexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    async fn unique_fields(&self, collection: &str) -> Vec<String> {
        self.unique_indexes
            .read()
            .await
            .get(collection)
            .map(|fields| fields.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Rejects `candidate` when another document (keyed differently than `key`)
    /// already holds the same value under a unique-indexed field.
    fn check_unique(
        collection_map: &CollectionMap,
        unique_fields: &[String],
        key: &str,
        candidate: &Bson,
        collection: &str,
    ) -> StoreResult<()> {
        for field in unique_fields {
            let value = match candidate.as_document().and_then(|doc| doc.get(field)) {
                Some(value) if value != &Bson::Null => value,
                _ => continue,
            };

            let taken = collection_map.iter().any(|(existing_key, existing)| {
                existing_key != key
                    && existing
                        .as_document()
                        .and_then(|doc| doc.get(field))
                        == Some(value)
            });

            if taken {
                return Err(StoreError::UniqueViolation {
                    field: field.clone(),
                    collection: collection.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> StoreResult<()> {
        let unique_fields = self.unique_fields(collection).await;
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        for (id, doc) in documents {
            let key = id.to_string();

            if collection_map.contains_key(&key) {
                return Err(StoreError::DocumentExists(key, collection.to_string()));
            }

            Self::check_unique(collection_map, &unique_fields, &key, &doc, collection)?;

            collection_map.insert(key, doc);
        }

        Ok(())
    }

    async fn update_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> StoreResult<()> {
        let unique_fields = self.unique_fields(collection).await;
        let mut store = self.store.write().await;
        let collection_map = match store.get_mut(collection) {
            Some(col) => col,
            None => return Err(StoreError::CollectionNotFound(collection.to_string())),
        };

        for (id, doc) in documents {
            let key = id.to_string();

            if !collection_map.contains_key(&key) {
                return Err(StoreError::DocumentNotFound(key, collection.to_string()));
            }

            Self::check_unique(collection_map, &unique_fields, &key, &doc, collection)?;

            collection_map.insert(key, doc);
        }

        Ok(())
    }

    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let collection_map = match store.get_mut(collection) {
            Some(col) => col,
            None => return Err(StoreError::CollectionNotFound(collection.to_string())),
        };

        for id in ids {
            let key = id.to_string();

            if collection_map.remove(&key).is_none() {
                return Err(StoreError::DocumentNotFound(key, collection.to_string()));
            }
        }

        Ok(())
    }

    async fn get_documents(&self, ids: Vec<Uuid>, collection: &str) -> StoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let mut documents = Vec::with_capacity(ids.len());

        for id in ids {
            let key = id.to_string();

            if let Some(doc) = collection_map.get(&key) {
                documents.push(doc.clone());
            }
        }

        Ok(documents)
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        // Apply filter expressions if present
        let filtered_docs = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(
                collection_map.values(),
                filter,
            )?,
            None => collection_map
                .values()
                .cloned()
                .collect::<Vec<_>>(),
        };

        // Apply sorting if specified
        if let Some(sort) = &query.sort {
            let mut sorted_docs = filtered_docs;

            sorted_docs.sort_by(|a, b| {
                let left = a
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);
                let right = b
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);

                match sort.direction {
                    SortDirection::Asc => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
                    SortDirection::Desc => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
                }
            });

            return Ok(
                sorted_docs
                    .into_iter()
                    .skip(query.offset.unwrap_or(0))
                    .take(query.limit.unwrap_or(usize::MAX))
                    .collect()
            );
        }

        Ok(
            filtered_docs
                .into_iter()
                .skip(query.offset.unwrap_or(0))
                .take(query.limit.unwrap_or(usize::MAX))
                .collect()
        )
    }

    async fn add_index(&self, collection: &str, field: &str, unique: bool) -> StoreResult<()> {
        // Non-unique indexes carry no meaning for a full-scan store
        if unique {
            self.unique_indexes
                .write()
                .await
                .entry(collection.to_string())
                .or_default()
                .insert(field.to_string());
        }

        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
