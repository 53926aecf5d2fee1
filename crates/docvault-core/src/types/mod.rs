//! Core type definitions used across the DocVault workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
