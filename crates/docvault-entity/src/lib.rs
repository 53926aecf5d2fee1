//! # docvault-entity
//!
//! Domain entity models for DocVault. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow` so the PostgreSQL store can map them directly.

pub mod access;
pub mod annotation;
pub mod category;
pub mod comment;
pub mod document;
pub mod share;
pub mod user;
