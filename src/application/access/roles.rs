//! Role management use-cases

use std::sync::Arc;

use tracing::info;

use crate::config::AuthorizationSection;
use crate::domain::{DomainError, DomainResult, Permission, RepositoryProvider, Role};
use crate::shared::{PaginatedResult, ResolvedLimit};

pub struct RoleService {
    repos: Arc<dyn RepositoryProvider>,
    authorization: AuthorizationSection,
}

impl RoleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, authorization: AuthorizationSection) -> Self {
        Self {
            repos,
            authorization,
        }
    }

    pub fn guard_name(&self) -> &str {
        &self.authorization.guard_name
    }

    fn duplicate(&self, name: &str) -> DomainError {
        DomainError::Conflict(format!(
            "A role `{}` already exists for guard `{}`.",
            name,
            self.guard_name()
        ))
    }

    pub async fn list_roles(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<Role>> {
        self.repos.roles().list_roles(limit, page).await
    }

    pub async fn get_role(&self, id: &str) -> DomainResult<Role> {
        self.repos
            .roles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", id))
    }

    pub async fn permissions_of(&self, role_id: &str) -> DomainResult<Vec<Permission>> {
        self.repos.roles().permissions_of(role_id).await
    }

    pub async fn create_role(&self, name: &str) -> DomainResult<Role> {
        let name = name.trim();
        let roles = self.repos.roles();

        if roles.find_by_name(name, self.guard_name()).await?.is_some() {
            return Err(self.duplicate(name));
        }

        let role = roles.create_role(name, self.guard_name()).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Rename a role. Default roles are immutable.
    pub async fn update_role(&self, id: &str, name: &str) -> DomainResult<Role> {
        let name = name.trim();
        let role = self.get_role(id).await?;
        if self.authorization.is_default_role(&role.name) {
            return Err(DomainError::Forbidden(
                "You cannot update/delete default role.".into(),
            ));
        }

        let roles = self.repos.roles();
        if let Some(other) = roles.find_by_name(name, &role.guard_name).await? {
            if other.id != role.id {
                return Err(self.duplicate(name));
            }
        }

        let updated = roles
            .rename_role(id, name)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", id))?;
        info!(role_id = %updated.id, name = %updated.name, "Role renamed");
        Ok(updated)
    }

    /// Delete a role and its assignments. Default roles are immutable.
    pub async fn delete_role(&self, id: &str) -> DomainResult<()> {
        let role = self.get_role(id).await?;
        if self.authorization.is_default_role(&role.name) {
            return Err(DomainError::Forbidden(
                "You cannot update/delete default role.".into(),
            ));
        }

        self.repos.roles().delete_role(id).await?;
        info!(role_id = %id, name = %role.name, "Role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    async fn service() -> (RoleService, TestDb) {
        let db = TestDb::seeded().await;
        let service = RoleService::new(db.repos.clone(), db.config.authorization.clone());
        (service, db)
    }

    #[tokio::test]
    async fn create_then_rename() {
        let (service, _db) = service().await;
        let role = service.create_role("im role name").await.unwrap();
        assert_eq!(role.guard_name, "api");

        let renamed = service.update_role(&role.id, "im role name new").await.unwrap();
        assert_eq!(renamed.name, "im role name new");
        assert_eq!(renamed.id, role.id);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_on_create() {
        let (service, _db) = service().await;
        service.create_role("im duplicate role name").await.unwrap();

        let err = service.create_role("im duplicate role name").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "A role `im duplicate role name` already exists for guard `api`."
        );
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_on_update() {
        let (service, _db) = service().await;
        service.create_role("taken").await.unwrap();
        let role = service.create_role("another role name").await.unwrap();

        let err = service.update_role(&role.id, "taken").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let (service, _db) = service().await;
        let role = service.create_role("same").await.unwrap();
        assert!(service.update_role(&role.id, "same").await.is_ok());
    }

    #[tokio::test]
    async fn default_role_cannot_change() {
        let (service, db) = service().await;
        let system = db.role_named("system").await;

        let err = service.update_role(&system.id, "renamed").await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = service.delete_role(&system.id).await.unwrap_err();
        assert_eq!(err.to_string(), "You cannot update/delete default role.");
    }

    #[tokio::test]
    async fn deleted_role_is_gone() {
        let (service, _db) = service().await;
        let role = service.create_role("temporary").await.unwrap();
        service.delete_role(&role.id).await.unwrap();

        let err = service.get_role(&role.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
