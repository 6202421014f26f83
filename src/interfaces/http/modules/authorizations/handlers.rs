//! Assignment API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{RolePermissionRequest, UserPermissionRequest, UserRoleRequest};
use crate::application::{AuthorizationService, RoleService, UserService};
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, IncludeParams, ValidatedJson,
};
use crate::interfaces::http::modules::roles::{transform_role, RoleDto};
use crate::interfaces::http::modules::users::{transform_user, UserDto};

#[derive(Clone)]
pub struct AuthorizationHandlerState {
    pub authorization_service: Arc<AuthorizationService>,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/authorizations/assign-role-to-user",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    params(IncludeParams),
    request_body = UserRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = ApiResponse<UserDto>),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn assign_role_to_user(
    State(state): State<AuthorizationHandlerState>,
    Query(params): Query<IncludeParams>,
    ValidatedJson(request): ValidatedJson<UserRoleRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .authorization_service
        .assign_role_to_user(&request.user_id, &request.role_id)
        .await
        .map_err(error_response)?;
    let dto = transform_user(&state.user_service, user, params.includes()).await?;
    Ok(Json(ApiResponse::success(dto)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/authorizations/revoke-role-from-user",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    request_body = UserRoleRequest,
    responses(
        (status = 204, description = "Role revoked"),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn revoke_role_from_user(
    State(state): State<AuthorizationHandlerState>,
    ValidatedJson(request): ValidatedJson<UserRoleRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .authorization_service
        .revoke_role_from_user(&request.user_id, &request.role_id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/authorizations/assign-permission-to-user",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    params(IncludeParams),
    request_body = UserPermissionRequest,
    responses(
        (status = 200, description = "Permission given", body = ApiResponse<UserDto>),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn assign_permission_to_user(
    State(state): State<AuthorizationHandlerState>,
    Query(params): Query<IncludeParams>,
    ValidatedJson(request): ValidatedJson<UserPermissionRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .authorization_service
        .assign_permission_to_user(&request.user_id, &request.permission_id)
        .await
        .map_err(error_response)?;
    let dto = transform_user(&state.user_service, user, params.includes()).await?;
    Ok(Json(ApiResponse::success(dto)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/authorizations/revoke-permission-from-user",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    request_body = UserPermissionRequest,
    responses(
        (status = 204, description = "Permission revoked"),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn revoke_permission_from_user(
    State(state): State<AuthorizationHandlerState>,
    ValidatedJson(request): ValidatedJson<UserPermissionRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .authorization_service
        .revoke_permission_from_user(&request.user_id, &request.permission_id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/authorizations/attach-permission-to-role",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    params(IncludeParams),
    request_body = RolePermissionRequest,
    responses(
        (status = 200, description = "Permission attached", body = ApiResponse<RoleDto>),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn attach_permission_to_role(
    State(state): State<AuthorizationHandlerState>,
    Query(params): Query<IncludeParams>,
    ValidatedJson(request): ValidatedJson<RolePermissionRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state
        .authorization_service
        .attach_permission_to_role(&request.role_id, &request.permission_id)
        .await
        .map_err(error_response)?;
    let dto = transform_role(&state.role_service, role, params.includes()).await?;
    Ok(Json(ApiResponse::success(dto)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/authorizations/revoke-permission-from-role",
    tag = "Authorizations",
    security(("bearer_auth" = [])),
    request_body = RolePermissionRequest,
    responses(
        (status = 204, description = "Permission revoked"),
        (status = 422, description = "Missing or unknown ids")
    )
)]
pub async fn revoke_permission_from_role(
    State(state): State<AuthorizationHandlerState>,
    ValidatedJson(request): ValidatedJson<RolePermissionRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .authorization_service
        .revoke_permission_from_role(&request.role_id, &request.permission_id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
