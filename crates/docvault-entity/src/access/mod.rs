//! Access history domain entities.

pub mod action;
pub mod model;

pub use action::AccessAction;
pub use model::{AccessHistory, Audited, CreateAccessHistory};
