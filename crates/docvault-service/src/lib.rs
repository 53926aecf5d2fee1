//! # docvault-service
//!
//! Business logic for DocVault. Every operation takes the acting user's
//! [`RequestContext`], resolves that user's permission on the target
//! document, and performs the write together with its access history row.

pub mod access;
pub mod category;
pub mod context;
pub mod discussion;
pub mod document;
pub mod share;
pub mod user;

pub use access::{AccessLogger, HistoryService};
pub use category::CategoryService;
pub use context::RequestContext;
pub use discussion::{AnnotationService, CommentService};
pub use document::DocumentService;
pub use share::ShareService;
pub use user::UserService;

#[cfg(test)]
pub(crate) mod testing;
