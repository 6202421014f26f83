//! Permission DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Permission;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionDto {
    pub id: String,
    pub name: String,
}

impl From<Permission> for PermissionDto {
    fn from(p: Permission) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

pub fn permission_dtos(permissions: Vec<Permission>) -> Vec<PermissionDto> {
    permissions.into_iter().map(PermissionDto::from).collect()
}
