//! Role and permission assignment
//!
//! Every operation validates that the referenced records exist before
//! touching the pivot tables. Unknown ids surface as validation errors,
//! one message per offending field.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Permission, RepositoryProvider, Role, User};

pub struct AuthorizationService {
    repos: Arc<dyn RepositoryProvider>,
}

fn invalid(field: &str) -> String {
    format!("The selected {} is invalid.", field.replace('_', " "))
}

impl AuthorizationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn user(&self, id: &str, errors: &mut Vec<String>) -> DomainResult<Option<User>> {
        let user = self.repos.users().get_user_by_id(id).await?;
        if user.is_none() {
            errors.push(invalid("user_id"));
        }
        Ok(user)
    }

    async fn role(&self, id: &str, errors: &mut Vec<String>) -> DomainResult<Option<Role>> {
        let role = self.repos.roles().find_by_id(id).await?;
        if role.is_none() {
            errors.push(invalid("role_id"));
        }
        Ok(role)
    }

    async fn permission(
        &self,
        id: &str,
        errors: &mut Vec<String>,
    ) -> DomainResult<Option<Permission>> {
        let permission = self.repos.permissions().find_by_id(id).await?;
        if permission.is_none() {
            errors.push(invalid("permission_id"));
        }
        Ok(permission)
    }

    async fn user_and_role(&self, user_id: &str, role_id: &str) -> DomainResult<(User, Role)> {
        let mut errors = Vec::new();
        let user = self.user(user_id, &mut errors).await?;
        let role = self.role(role_id, &mut errors).await?;
        match (user, role) {
            (Some(user), Some(role)) => Ok((user, role)),
            _ => Err(DomainError::Validation(errors.join("; "))),
        }
    }

    async fn user_and_permission(
        &self,
        user_id: &str,
        permission_id: &str,
    ) -> DomainResult<(User, Permission)> {
        let mut errors = Vec::new();
        let user = self.user(user_id, &mut errors).await?;
        let permission = self.permission(permission_id, &mut errors).await?;
        match (user, permission) {
            (Some(user), Some(permission)) => Ok((user, permission)),
            _ => Err(DomainError::Validation(errors.join("; "))),
        }
    }

    async fn role_and_permission(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> DomainResult<(Role, Permission)> {
        let mut errors = Vec::new();
        let role = self.role(role_id, &mut errors).await?;
        let permission = self.permission(permission_id, &mut errors).await?;
        match (role, permission) {
            (Some(role), Some(permission)) => Ok((role, permission)),
            _ => Err(DomainError::Validation(errors.join("; "))),
        }
    }

    pub async fn assign_role_to_user(&self, user_id: &str, role_id: &str) -> DomainResult<User> {
        let (user, role) = self.user_and_role(user_id, role_id).await?;
        self.repos.users().assign_role(&user.id, &role.id).await?;
        info!(user_id = %user.id, role = %role.name, "Role assigned to user");
        Ok(user)
    }

    pub async fn revoke_role_from_user(&self, user_id: &str, role_id: &str) -> DomainResult<()> {
        let (user, role) = self.user_and_role(user_id, role_id).await?;
        self.repos.users().remove_role(&user.id, &role.id).await?;
        info!(user_id = %user.id, role = %role.name, "Role revoked from user");
        Ok(())
    }

    pub async fn assign_permission_to_user(
        &self,
        user_id: &str,
        permission_id: &str,
    ) -> DomainResult<User> {
        let (user, permission) = self.user_and_permission(user_id, permission_id).await?;
        self.repos
            .users()
            .give_permission_to(&user.id, &permission.id)
            .await?;
        info!(user_id = %user.id, permission = %permission.name, "Permission given to user");
        Ok(user)
    }

    pub async fn revoke_permission_from_user(
        &self,
        user_id: &str,
        permission_id: &str,
    ) -> DomainResult<()> {
        let (user, permission) = self.user_and_permission(user_id, permission_id).await?;
        self.repos
            .users()
            .revoke_permission_to(&user.id, &permission.id)
            .await?;
        info!(user_id = %user.id, permission = %permission.name, "Permission revoked from user");
        Ok(())
    }

    pub async fn attach_permission_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> DomainResult<Role> {
        let (role, permission) = self.role_and_permission(role_id, permission_id).await?;
        self.repos
            .roles()
            .give_permission_to(&role.id, &permission.id)
            .await?;
        info!(role = %role.name, permission = %permission.name, "Permission attached to role");
        Ok(role)
    }

    pub async fn revoke_permission_from_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> DomainResult<()> {
        let (role, permission) = self.role_and_permission(role_id, permission_id).await?;
        self.repos
            .roles()
            .revoke_permission_to(&role.id, &permission.id)
            .await?;
        info!(role = %role.name, permission = %permission.name, "Permission revoked from role");
        Ok(())
    }

    /// Direct or role-derived permission check. Inactive or unknown
    /// accounts hold nothing.
    pub async fn user_can(&self, user_id: &str, permission: &str) -> DomainResult<bool> {
        let users = self.repos.users();
        match users.get_user_by_id(user_id).await? {
            Some(user) if user.is_active => users.has_permission(user_id, permission).await,
            _ => Ok(false),
        }
    }
}
