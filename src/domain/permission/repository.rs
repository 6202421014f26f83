use async_trait::async_trait;

use super::Permission;
use crate::shared::{DomainResult, PaginatedResult, ResolvedLimit};

#[async_trait]
pub trait PermissionRepositoryInterface: Send + Sync {
    async fn list_permissions(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<Permission>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Permission>>;
    async fn find_by_name(&self, name: &str, guard_name: &str)
        -> DomainResult<Option<Permission>>;
    async fn create_permission(&self, name: &str, guard_name: &str) -> DomainResult<Permission>;
}
