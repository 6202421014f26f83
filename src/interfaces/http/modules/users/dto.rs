//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{UpdateUserDto, User};
use crate::interfaces::http::modules::permissions::PermissionDto;
use crate::interfaces::http::modules::roles::RoleDto;

/// User API representation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Present with `?include=roles`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleDto>>,
    /// Direct permissions, present with `?include=permissions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionDto>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_active: u.is_active,
            created_at: u.created_at,
            roles: None,
            permissions: None,
        }
    }
}

/// Update user request; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "The username must be between 1 and 50 characters."))]
    pub username: Option<String>,
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            is_active: r.is_active,
        }
    }
}
