//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::application::UserService;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, Includes, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::{transform_user, UserDto};

#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Missing username or password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .user_service
        .login(&request.username, &request.password)
        .await
        .map_err(error_response)?;

    let response = LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: UserDto::from(auth.user),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user with roles and direct permissions", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let current = state
        .user_service
        .get_user(&user.user_id)
        .await
        .map_err(error_response)?;
    let includes = Includes {
        roles: true,
        permissions: true,
    };
    let dto = transform_user(&state.user_service, current, includes).await?;
    Ok(Json(ApiResponse::success(dto)))
}
