//! Access control: roles, permissions and their assignment

pub mod authorization;
pub mod permissions;
pub mod roles;

pub use authorization::AuthorizationService;
pub use permissions::PermissionService;
pub use roles::RoleService;
