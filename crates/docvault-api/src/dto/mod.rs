//! Data Transfer Objects for the HTTP layer.

pub mod numeric;
pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
