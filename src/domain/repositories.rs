//! Repository provider: one accessor per aggregate.

use super::{PermissionRepositoryInterface, RoleRepositoryInterface, UserRepositoryInterface};

/// Unified access to every repository, shared by the application services.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn roles(&self) -> &dyn RoleRepositoryInterface;
    fn permissions(&self) -> &dyn PermissionRepositoryInterface;
}
