//! In-memory entity store.
//!
//! Selected with `database.provider = "memory"`. Intended for tests and
//! local development; contents are lost on restart.

mod store;

pub use store::MemoryStore;
