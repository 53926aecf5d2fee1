//! Effective permission resolution for documents.

pub mod resolver;

pub use resolver::{EffectivePermission, PermissionResolver, PermissionSource};
