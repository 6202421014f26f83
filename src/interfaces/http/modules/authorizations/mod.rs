//! Authorizations module: role and permission assignment

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
