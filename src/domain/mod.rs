//! Domain layer: aggregates and the repository interfaces they are
//! persisted through.

pub mod permission;
pub mod repositories;
pub mod role;
pub mod user;

pub use permission::{names as permission_names, Permission, PermissionRepositoryInterface};
pub use repositories::RepositoryProvider;
pub use role::{Role, RoleRepositoryInterface};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface};

pub use crate::shared::{DomainError, DomainResult};
