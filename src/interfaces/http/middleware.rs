//! Authentication and permission middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::AuthorizationService;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
    Internal,
}

/// State for the JWT middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// State for the permission middleware: one gate per route group.
#[derive(Clone)]
pub struct PermissionGate {
    pub authorization: Arc<AuthorizationService>,
    pub permission: &'static str,
}

impl PermissionGate {
    pub fn new(authorization: Arc<AuthorizationService>, permission: &'static str) -> Self {
        Self {
            authorization,
            permission,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT bearer authentication
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Reject callers that hold the gate's permission neither directly nor
/// through a role. Must run after `auth_middleware`.
pub async fn permission_middleware(
    State(gate): State<PermissionGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>().cloned() else {
        return auth_error_response(AuthError::MissingToken);
    };

    match gate.authorization.user_can(&user.user_id, gate.permission).await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            warn!(
                user_id = %user.user_id,
                permission = gate.permission,
                "Permission denied"
            );
            auth_error_response(AuthError::InsufficientPermissions)
        }
        Err(e) => {
            error!(error = %e, "Permission lookup failed");
            auth_error_response(AuthError::Internal)
        }
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthenticated."),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::InsufficientPermissions => (
            StatusCode::FORBIDDEN,
            "User does not have the right permissions.",
        ),
        AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("abc.def"), None);
    }
}
