//! HTTP request handlers organized by domain.

pub mod annotation;
pub mod category;
pub mod comment;
pub mod document;
pub mod health;
pub mod history;
pub mod share;
