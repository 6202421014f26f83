//! Permission aggregate

pub mod model;
pub mod repository;

pub use model::{names, Permission};
pub use repository::PermissionRepositoryInterface;
