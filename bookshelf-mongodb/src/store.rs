use async_trait::async_trait;
use bson::{Bson, Document, Uuid, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, FindOptions, IndexOptions},
};

use bookshelf_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Query, QueryVisitor, SortDirection},
};

use crate::query::MongoQueryTranslator;

/// MongoDB-backed [`StoreBackend`].
///
/// Documents are stored with their UUID as `_id`; the field is stripped again
/// on the way out so stored BSON round-trips unchanged. Updates replace the
/// full document. Duplicate-key write failures (unique index violations) are
/// mapped to [`StoreError::UniqueViolation`].
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn prepare_document(&self, id: &Uuid, document: &Bson) -> StoreResult<Document> {
        Ok(Document::from_iter(
            document
                .as_document()
                .cloned()
                .ok_or_else(|| StoreError::InvalidDocument("Expected document".into()))?
                .into_iter()
                .chain(vec![("_id".to_string(), (*id).into())]),
        ))
    }

    fn restore_document(&self, document: &Document) -> StoreResult<Bson> {
        Ok(Bson::Document(Document::from_iter(
            document
                .clone()
                .into_iter()
                .filter(|(k, _)| k != "_id"),
        )))
    }

    fn map_write_error(err: MongoError, collection: &str) -> StoreError {
        if let Some(field) = duplicate_key_field(&err) {
            return StoreError::UniqueViolation {
                field,
                collection: collection.to_string(),
            };
        }

        StoreError::Backend(err.to_string())
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Extracts the indexed field name from a duplicate-key (code 11000) failure,
/// or `None` when the error is anything else.
///
/// The server reports the index name ("isbn_1"), not the field; the default
/// single-field index name is the field plus a direction suffix, which is
/// stripped back off.
fn duplicate_key_field(err: &MongoError) -> Option<String> {
    let message = match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000 => {
            write_error.message.clone()
        }
        _ => {
            let text = err.to_string();
            if !text.contains("E11000") {
                return None;
            }
            text
        }
    };

    let index = message
        .split_once("index: ")
        .map(|(_, rest)| rest.split_whitespace().next().unwrap_or(""))
        .unwrap_or("");

    Some(
        index
            .trim_end_matches("_1")
            .trim_end_matches("_-1")
            .to_string(),
    )
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .insert_many(
                documents
                    .iter()
                    .map(|(id, doc)| self.prepare_document(id, doc))
                    .collect::<StoreResult<Vec<Document>>>()?,
            )
            .await
            .map_err(|e| Self::map_write_error(e, collection))?;

        Ok(())
    }

    async fn update_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> StoreResult<()> {
        for (id, doc) in documents {
            let result = self
                .get_collection(collection)
                .replace_one(doc! { "_id": id }, self.prepare_document(&id, &doc)?)
                .await
                .map_err(|e| Self::map_write_error(e, collection))?;

            if result.matched_count == 0 {
                return Err(StoreError::DocumentNotFound(
                    id.to_string(),
                    collection.to_string(),
                ));
            }
        }

        Ok(())
    }

    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .delete_many(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn get_documents(&self, ids: Vec<Uuid>, collection: &str) -> StoreResult<Vec<Bson>> {
        Ok(
            self.get_collection(collection)
                .find(doc! { "_id": { "$in": ids } })
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .into_iter()
                .map(|doc| self.restore_document(&doc))
                .collect::<StoreResult<Vec<Bson>>>()?
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(limit as i64);
        }
        if let Some(skip) = query.offset {
            options.skip = Some(skip as u64);
        }
        if let Some(sort) = &query.sort {
            options.sort = Some(doc! {
                sort.field.clone(): match sort.direction {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                }
            })
        }

        Ok(
            self.get_collection(collection)
                .find(
                    if let Some(expr) = &query.filter {
                        MongoQueryTranslator.visit_expr(expr)?
                    } else {
                        doc! {}
                    },
                )
                .with_options(options)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .into_iter()
                .map(|doc| self.restore_document(&doc))
                .collect::<StoreResult<Vec<Bson>>>()?
        )
    }

    async fn add_index(&self, collection: &str, field: &str, unique: bool) -> StoreResult<()> {
        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(
                        IndexOptions::builder()
                            .unique(unique)
                            .build()
                    )
                    .build()
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.shutdown().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
