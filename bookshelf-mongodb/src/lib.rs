//! MongoDB backend implementation.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! enabling persistent document storage with query execution delegated to MongoDB's
//! native query engine.
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Full query support** - Filter expressions translate to native BSON filters
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//! - **Unique indexes** - Duplicate-key failures surface as unique-constraint errors
//!
//! # Connection
//!
//! A single client is built from a connection string and database name through
//! [`MongoDbStore::builder`]; the driver manages its own connection pool, so one
//! store instance is shared by all requests.

mod query;
mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
