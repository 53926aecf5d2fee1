//! # docvault-auth
//!
//! Decides what a user may do to a document, and turns bearer tokens
//! into verified identities.
//!
//! ## Modules
//!
//! - `acl`: effective permission resolution (ownership, shares, shared flag)
//! - `jwt`: HS256 identity token decoding, plus minting for admin tooling

pub mod acl;
pub mod jwt;

pub use acl::{EffectivePermission, PermissionResolver, PermissionSource};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
