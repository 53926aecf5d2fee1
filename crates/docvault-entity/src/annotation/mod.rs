//! Annotation domain entities.

pub mod model;

pub use model::{Annotation, CreateAnnotation, DEFAULT_PAGE};
