use async_trait::async_trait;

use super::Role;
use crate::domain::Permission;
use crate::shared::{DomainResult, PaginatedResult, ResolvedLimit};

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn list_roles(&self, limit: ResolvedLimit, page: u64)
        -> DomainResult<PaginatedResult<Role>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Role>>;
    async fn find_by_name(&self, name: &str, guard_name: &str) -> DomainResult<Option<Role>>;

    async fn create_role(&self, name: &str, guard_name: &str) -> DomainResult<Role>;
    async fn rename_role(&self, id: &str, name: &str) -> DomainResult<Option<Role>>;
    async fn delete_role(&self, id: &str) -> DomainResult<()>;

    /// Idempotent: attaching an already attached permission is a no-op.
    async fn give_permission_to(&self, role_id: &str, permission_id: &str) -> DomainResult<()>;
    async fn revoke_permission_to(&self, role_id: &str, permission_id: &str) -> DomainResult<()>;
    async fn permissions_of(&self, role_id: &str) -> DomainResult<Vec<Permission>>;
}
