//! Document domain entities.

pub mod model;

pub use model::{CreateDocument, Document, MAX_TITLE_LENGTH, UpdateDocument};
