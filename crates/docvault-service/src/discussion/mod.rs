//! Comments and annotations on documents.

pub mod annotation;
pub mod comment;
pub mod view;

pub use annotation::{AnnotationService, NewAnnotation};
pub use comment::CommentService;
pub use view::{AnnotationView, CommentView};
