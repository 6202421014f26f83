//! Response envelopes, error mapping and list query parameters shared by
//! every HTTP module.

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::domain::DomainError;
use crate::shared::{LimitRequest, PaginatedResult, PaginationConfig, PaginationMeta, ResolvedLimit};

pub use validated_json::ValidatedJson;

/// Standard API response wrapper.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination block wrapper: `{"pagination": {...}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}

/// List response: `{"data": [...], "meta": {"pagination": {...}}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result(result: PaginatedResult<T>) -> Self {
        let meta = ListMeta {
            pagination: result.meta(),
        };
        Self {
            data: result.items,
            meta,
        }
    }
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain failure onto the JSON error envelope.
pub fn error_response(error: DomainError) -> ApiError {
    let status = status_for(&error);
    if status.is_server_error() {
        error!(error = %error, "Request failed");
        return (status, Json(ApiResponse::error("Internal server error")));
    }
    (status, Json(ApiResponse::error(error.to_string())))
}

/// Query string accepted by every list endpoint.
///
/// Everything stays a string so that junk values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Requested page size; ignored when overrides are disabled
    pub limit: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Comma separated relations, e.g. `roles,permissions`
    pub include: Option<String>,
}

impl ListParams {
    /// Effective page size for this request.
    pub fn limit(&self, config: &PaginationConfig) -> ResolvedLimit {
        let request = LimitRequest::new(self.limit.clone());
        let resolved = config.resolve(&request);
        debug!(
            requested = ?request.raw(),
            resolved = resolved.get(),
            "Pagination limit resolved"
        );
        metrics::histogram!("pagination_limit_resolved").record(resolved.get() as f64);
        resolved
    }

    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    pub fn includes(&self) -> Includes {
        Includes::parse(self.include.as_deref())
    }
}

/// `?include=` query for single-resource endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncludeParams {
    /// Comma separated relations, e.g. `roles,permissions`
    pub include: Option<String>,
}

impl IncludeParams {
    pub fn includes(&self) -> Includes {
        Includes::parse(self.include.as_deref())
    }
}

/// Optional relations requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Includes {
    pub roles: bool,
    pub permissions: bool,
}

impl Includes {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut includes = Self::default();
        for part in raw.unwrap_or_default().split(',') {
            match part.trim() {
                "roles" => includes.roles = true,
                "permissions" => includes.permissions = true,
                _ => {}
            }
        }
        includes
    }
}
