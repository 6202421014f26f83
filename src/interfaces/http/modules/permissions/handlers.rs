//! Permission API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::PermissionDto;
use crate::application::PermissionService;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ListParams, PaginatedResponse,
};
use crate::shared::PaginationConfig;

#[derive(Clone)]
pub struct PermissionHandlerState {
    pub permission_service: Arc<PermissionService>,
    pub pagination: PaginationConfig,
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    tag = "Permissions",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "Permission list", body = PaginatedResponse<PermissionDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing `view permission`")
    )
)]
pub async fn list_permissions(
    State(state): State<PermissionHandlerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<PermissionDto>>, ApiError> {
    let limit = params.limit(&state.pagination);
    let mut result = state
        .permission_service
        .list_permissions(limit, params.page())
        .await
        .map_err(error_response)?;

    let items = std::mem::take(&mut result.items)
        .into_iter()
        .map(PermissionDto::from)
        .collect();

    Ok(Json(PaginatedResponse::from_result(
        result.replace_items(items),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions/{id}",
    tag = "Permissions",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Permission details", body = ApiResponse<PermissionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_permission(
    State(state): State<PermissionHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PermissionDto>>, ApiError> {
    let permission = state
        .permission_service
        .get_permission(&id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(permission.into())))
}
