//! Per-user document sharing.

pub mod service;

pub use service::ShareService;
