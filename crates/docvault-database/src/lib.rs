//! # docvault-database
//!
//! The entity store for DocVault: one trait per entity family, a
//! PostgreSQL implementation of each, and an in-memory implementation
//! selected through configuration.
//!
//! Writes that must be audited take the access history entry alongside
//! the record and commit both together.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    AccessHistoryStore, AnnotationStore, CategoryStore, CommentStore, DocumentStore, ShareStore,
    Stores, UserStore,
};
