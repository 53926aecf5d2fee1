//! Comment domain entities.

pub mod model;
pub mod thread;

pub use model::{Comment, CreateComment};
pub use thread::{CommentNode, MAX_THREAD_DEPTH, build_threads};
