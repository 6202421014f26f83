//! User management API handlers
//!
//! Thin wrappers over `UserService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::domain::User;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, IncludeParams, Includes, ListParams,
    PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::modules::permissions::permission_dtos;
use crate::interfaces::http::modules::roles::RoleDto;
use crate::shared::PaginationConfig;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
    pub pagination: PaginationConfig,
}

/// Build the user representation with the requested relations.
pub async fn transform_user(
    user_service: &UserService,
    user: User,
    includes: Includes,
) -> Result<UserDto, ApiError> {
    let user_id = user.id.clone();
    let mut dto = UserDto::from(user);

    if includes.roles {
        let roles = user_service
            .roles_of(&user_id)
            .await
            .map_err(error_response)?;
        dto.roles = Some(roles.into_iter().map(RoleDto::from).collect());
    }
    if includes.permissions {
        let permissions = user_service
            .permissions_of(&user_id)
            .await
            .map_err(error_response)?;
        dto.permissions = Some(permission_dtos(permissions));
    }

    Ok(dto)
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing `manage user`")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, ApiError> {
    let limit = params.limit(&state.pagination);
    let includes = params.includes();
    let mut result = state
        .user_service
        .list_users(limit, params.page())
        .await
        .map_err(error_response)?;

    let users = std::mem::take(&mut result.items);
    let mut items = Vec::with_capacity(users.len());
    for user in users {
        items.push(transform_user(&state.user_service, user, includes).await?);
    }

    Ok(Json(PaginatedResponse::from_result(
        result.replace_items(items),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID"), IncludeParams),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    Query(params): Query<IncludeParams>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.user_service.get_user(&id).await.map_err(error_response)?;
    let dto = transform_user(&state.user_service, user, params.includes()).await?;
    Ok(Json(ApiResponse::success(dto)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Invalid or already taken email/username")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .user_service
        .update_user(&id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
