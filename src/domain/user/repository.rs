use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::{Permission, Role};
use crate::shared::{DomainResult, PaginatedResult, ResolvedLimit};

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self, limit: ResolvedLimit, page: u64)
        -> DomainResult<PaginatedResult<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;

    /// Idempotent: assigning an already held role is a no-op.
    async fn assign_role(&self, user_id: &str, role_id: &str) -> DomainResult<()>;
    async fn remove_role(&self, user_id: &str, role_id: &str) -> DomainResult<()>;
    /// Idempotent, like `assign_role`.
    async fn give_permission_to(&self, user_id: &str, permission_id: &str) -> DomainResult<()>;
    async fn revoke_permission_to(&self, user_id: &str, permission_id: &str) -> DomainResult<()>;

    async fn roles_of(&self, user_id: &str) -> DomainResult<Vec<Role>>;
    async fn direct_permissions_of(&self, user_id: &str) -> DomainResult<Vec<Permission>>;
    /// True when the permission is held directly or through any role.
    async fn has_permission(&self, user_id: &str, permission: &str) -> DomainResult<bool>;
}
