//! User management service: application-layer orchestration
//!
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Permission, RepositoryProvider, Role, UpdateUserDto, User,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::verify_password;
use crate::shared::{PaginatedResult, ResolvedLimit};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service: orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let users = self.repos.users();
        let user = match users.get_user_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => users.get_user_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &user.username, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        users.touch_last_login(&user.id).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list_users(limit, page).await
    }

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn roles_of(&self, user_id: &str) -> DomainResult<Vec<Role>> {
        self.repos.users().roles_of(user_id).await
    }

    pub async fn permissions_of(&self, user_id: &str) -> DomainResult<Vec<Permission>> {
        self.repos.users().direct_permissions_of(user_id).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update username, email or active flag. Username and email stay unique.
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        let users = self.repos.users();

        if let Some(ref email) = dto.email {
            if let Some(other) = users.get_user_by_email(email).await? {
                if other.id != id {
                    return Err(DomainError::Validation(
                        "The email has already been taken.".into(),
                    ));
                }
            }
        }

        if let Some(ref username) = dto.username {
            if let Some(other) = users.get_user_by_username(username).await? {
                if other.id != id {
                    return Err(DomainError::Validation(
                        "The username has already been taken.".into(),
                    ));
                }
            }
        }

        let user = users
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }
}
