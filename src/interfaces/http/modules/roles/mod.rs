//! Roles module: role CRUD, default roles are read-only

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
