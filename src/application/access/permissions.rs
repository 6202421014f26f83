//! Read-only permission queries

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, Permission, RepositoryProvider};
use crate::shared::{PaginatedResult, ResolvedLimit};

pub struct PermissionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PermissionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_permissions(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<Permission>> {
        self.repos.permissions().list_permissions(limit, page).await
    }

    pub async fn get_permission(&self, id: &str) -> DomainResult<Permission> {
        self.repos
            .permissions()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Permission", id))
    }
}
