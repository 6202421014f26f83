//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use super::{SeaOrmPermissionRepository, SeaOrmRoleRepository, SeaOrmUserRepository};
use crate::domain::{
    PermissionRepositoryInterface, RepositoryProvider, RoleRepositoryInterface,
    UserRepositoryInterface,
};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let role = repos.roles().find_by_name("system", "api").await?;
/// let allowed = repos.users().has_permission(&user_id, "manage role").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    roles: SeaOrmRoleRepository,
    permissions: SeaOrmPermissionRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            roles: SeaOrmRoleRepository::new(db.clone()),
            permissions: SeaOrmPermissionRepository::new(db),
        }
    }

    /// Override the bcrypt cost used when creating users.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.users = self.users.with_bcrypt_cost(cost);
        self
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn roles(&self) -> &dyn RoleRepositoryInterface {
        &self.roles
    }

    fn permissions(&self) -> &dyn PermissionRepositoryInterface {
        &self.permissions
    }
}
