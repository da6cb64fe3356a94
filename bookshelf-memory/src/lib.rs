//! In-memory document storage backend.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend`
//! trait. It uses async-aware read-write locks for concurrent access and is the
//! substitutable storage used for development and testing.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Type-erased storage** - Stores documents as BSON for flexibility
//! - **Full query support** - Supports filtering, sorting, offset, and limit
//! - **Unique indexes** - Registered unique indexes are enforced on insert and update

mod evaluator;
mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
