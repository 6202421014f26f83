//! Role DTOs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::Role;
use crate::interfaces::http::modules::permissions::PermissionDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
    /// Present with `?include=permissions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionDto>>,
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            name: r.name,
            permissions: None,
        }
    }
}

impl RoleDto {
    pub fn with_permissions(mut self, permissions: Vec<PermissionDto>) -> Self {
        self.permissions = Some(permissions);
        self
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::from("The name field is required."));
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /roles` and `PUT /roles/{id}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoleRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 125, message = "The name may not be greater than 125 characters.")
    )]
    pub name: String,
}
