//! Book and review catalog REST API.
//!
//! The server exposes CRUD endpoints plus a handful of aggregates over two
//! related document collections, backed by any
//! [`StoreBackend`](bookshelf_core::backend::StoreBackend) implementation.
//! Production runs against MongoDB; tests and local development run against
//! the in-memory store through the exact same code paths.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
