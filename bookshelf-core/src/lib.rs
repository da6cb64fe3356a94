//! Storage-agnostic document layer shared by every bookshelf backend.
//!
//! This crate defines the pieces the application and the storage backends agree on:
//!
//! - **Document traits** ([`document`]) - Core traits for defining and serializing documents
//! - **Store backend abstraction** ([`backend`]) - The trait storage backends implement
//! - **Query and filtering API** ([`query`]) - Type-safe query construction and filtering
//! - **Collections interface** ([`collection`]) - High-level API for a single document collection
//! - **Document store** ([`store`]) - Entry point tying a backend to typed collections
//! - **Error handling** ([`error`]) - Storage error taxonomy and result type
//!
//! # Example
//!
//! ```ignore
//! use bookshelf_core::{document::Document, store::DocumentStore};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Book {
//!     pub id: Uuid,
//!     pub title: String,
//! }
//!
//! impl Document for Book {
//!     fn id(&self) -> &Uuid {
//!         &self.id
//!     }
//!
//!     fn collection_name() -> &'static str {
//!         "books"
//!     }
//! }
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
