//! Application layer: use cases orchestrating the repositories.
//!
//! HTTP handlers stay thin and delegate here.

pub mod access;
pub mod identity;
pub mod seed;

pub use access::{AuthorizationService, PermissionService, RoleService};
pub use identity::{AuthResult, UserService};
pub use seed::seed_defaults;
