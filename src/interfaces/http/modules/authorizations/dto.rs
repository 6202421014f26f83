//! Assignment request bodies
//!
//! Missing ids deserialize to empty strings so they are reported by
//! validation (422) instead of by the JSON parser (400).

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRoleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The user id field is required."))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The role id field is required."))]
    pub role_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPermissionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The user id field is required."))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The permission id field is required."))]
    pub permission_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RolePermissionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The role id field is required."))]
    pub role_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The permission id field is required."))]
    pub permission_id: String,
}
