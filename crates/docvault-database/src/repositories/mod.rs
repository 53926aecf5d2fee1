//! PostgreSQL implementations of the store traits.

pub mod access;
pub mod annotation;
pub mod category;
pub mod comment;
pub mod document;
pub mod share;
pub mod user;

pub use access::AccessHistoryRepository;
pub use annotation::AnnotationRepository;
pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use document::DocumentRepository;
pub use share::ShareRepository;
pub use user::UserRepository;

use docvault_core::error::{AppError, ErrorKind};

/// Map a failed write, surfacing constraint violations as domain errors.
pub(crate) fn write_error(context: &str, err: sqlx::Error) -> AppError {
    if let Some(db) = err.as_database_error() {
        if db.is_unique_violation() {
            return AppError::with_source(
                ErrorKind::Conflict,
                format!("{context}: already exists"),
                err,
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::with_source(
                ErrorKind::NotFound,
                format!("{context}: referenced record does not exist"),
                err,
            );
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

/// Map a failed read or transaction step.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
