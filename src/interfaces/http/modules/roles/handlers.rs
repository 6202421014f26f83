//! Role API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{RoleDto, RoleRequest};
use crate::application::RoleService;
use crate::domain::Role;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, IncludeParams, Includes, ListParams,
    PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::modules::permissions::permission_dtos;
use crate::shared::PaginationConfig;

#[derive(Clone)]
pub struct RoleHandlerState {
    pub role_service: Arc<RoleService>,
    pub pagination: PaginationConfig,
}

/// Build the role representation, loading permissions when requested.
pub async fn transform_role(
    role_service: &RoleService,
    role: Role,
    includes: Includes,
) -> Result<RoleDto, ApiError> {
    if !includes.permissions {
        return Ok(role.into());
    }
    let permissions = role_service
        .permissions_of(&role.id)
        .await
        .map_err(error_response)?;
    Ok(RoleDto::from(role).with_permissions(permission_dtos(permissions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "Role list", body = PaginatedResponse<RoleDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing `manage role`")
    )
)]
pub async fn list_roles(
    State(state): State<RoleHandlerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<RoleDto>>, ApiError> {
    let limit = params.limit(&state.pagination);
    let includes = params.includes();
    let mut result = state
        .role_service
        .list_roles(limit, params.page())
        .await
        .map_err(error_response)?;

    let roles = std::mem::take(&mut result.items);
    let mut items = Vec::with_capacity(roles.len());
    for role in roles {
        items.push(transform_role(&state.role_service, role, includes).await?);
    }

    Ok(Json(PaginatedResponse::from_result(
        result.replace_items(items),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID"), IncludeParams),
    responses(
        (status = 200, description = "Role details", body = ApiResponse<RoleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<String>,
    Query(params): Query<IncludeParams>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state.role_service.get_role(&id).await.map_err(error_response)?;
    let dto = transform_role(&state.role_service, role, params.includes()).await?;
    Ok(Json(ApiResponse::success(dto)))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleDto>),
        (status = 422, description = "Missing or duplicate name")
    )
)]
pub async fn create_role(
    State(state): State<RoleHandlerState>,
    ValidatedJson(request): ValidatedJson<RoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoleDto>>), ApiError> {
    let role = state
        .role_service
        .create_role(&request.name)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoleDto::from(role))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role renamed", body = ApiResponse<RoleDto>),
        (status = 403, description = "Default role"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Missing or duplicate name")
    )
)]
pub async fn update_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RoleRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state
        .role_service
        .update_role(&id, &request.name)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Default role"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .role_service
        .delete_role(&id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
