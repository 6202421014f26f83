//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthorizationService, PermissionService, RoleService, UserService};
use crate::config::AppConfig;
use crate::domain::{permission_names, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, ListMeta, PaginatedResponse};
use crate::interfaces::http::middleware::{
    auth_middleware, permission_middleware, AuthState, PermissionGate,
};
use crate::interfaces::http::modules::{
    auth, authorizations, health, metrics, permissions, request_id, roles, users,
};
use crate::shared::{ConfigError, PaginationConfig, PaginationMeta};

/// Everything the HTTP layer needs, built once at startup.
/// Handlers pull their own slice through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub pagination: PaginationConfig,
    pub jwt_config: JwtConfig,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub permission_service: Arc<PermissionService>,
    pub authorization_service: Arc<AuthorizationService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        let jwt_config = JwtConfig::from(&config.security);
        Ok(Self {
            db,
            pagination: config.pagination_config()?,
            jwt_config: jwt_config.clone(),
            user_service: Arc::new(UserService::new(repos.clone(), jwt_config)),
            role_service: Arc::new(RoleService::new(
                repos.clone(),
                config.authorization.clone(),
            )),
            permission_service: Arc::new(PermissionService::new(repos.clone())),
            authorization_service: Arc::new(AuthorizationService::new(repos)),
            started_at: Arc::new(Instant::now()),
        })
    }

    fn gate(&self, permission: &'static str) -> PermissionGate {
        PermissionGate::new(Arc::clone(&self.authorization_service), permission)
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            jwt_config: s.jwt_config.clone(),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for roles::RoleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        roles::RoleHandlerState {
            role_service: Arc::clone(&s.role_service),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for permissions::PermissionHandlerState {
    fn from_ref(s: &AppState) -> Self {
        permissions::PermissionHandlerState {
            permission_service: Arc::clone(&s.permission_service),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for authorizations::AuthorizationHandlerState {
    fn from_ref(s: &AppState) -> Self {
        authorizations::AuthorizationHandlerState {
            authorization_service: Arc::clone(&s.authorization_service),
            user_service: Arc::clone(&s.user_service),
            role_service: Arc::clone(&s.role_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        // Roles
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        // Permissions
        permissions::list_permissions,
        permissions::get_permission,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        // Authorizations
        authorizations::assign_role_to_user,
        authorizations::revoke_role_from_user,
        authorizations::assign_permission_to_user,
        authorizations::revoke_permission_from_user,
        authorizations::attach_permission_to_role,
        authorizations::revoke_permission_from_role,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            ListMeta,
            PaginationMeta,
            PaginatedResponse<roles::RoleDto>,
            PaginatedResponse<permissions::PermissionDto>,
            PaginatedResponse<users::UserDto>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Roles
            roles::RoleDto,
            roles::RoleRequest,
            // Permissions
            permissions::PermissionDto,
            // Users
            users::UserDto,
            users::UpdateUserRequest,
            // Authorizations
            authorizations::UserRoleRequest,
            authorizations::UserPermissionRequest,
            authorizations::RolePermissionRequest,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Authentication", description = "JWT login and current user"),
        (name = "Roles", description = "Role management; default roles are read-only"),
        (name = "Permissions", description = "Permission catalogue"),
        (name = "Users", description = "User listing and updates"),
        (name = "Authorizations", description = "Assigning roles and permissions"),
    ),
    info(
        title = "Authz Service API",
        version = "1.0.0",
        description = "Role and permission management backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Wrap a route group with authentication and a permission gate.
///
/// Layers run outside-in: the JWT check added last runs first.
fn guarded(routes: Router<AppState>, state: &AppState, permission: &'static str) -> Router<AppState> {
    routes
        .layer(middleware::from_fn_with_state(
            state.gate(permission),
            permission_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            AuthState::from_ref(state),
            auth_middleware,
        ))
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new().route("/login", post(auth::login));

    // Auth routes (authenticated, no permission required)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            auth_middleware,
        ));

    let role_routes = guarded(
        Router::new()
            .route("/", get(roles::list_roles).post(roles::create_role))
            .route(
                "/{id}",
                get(roles::get_role)
                    .put(roles::update_role)
                    .delete(roles::delete_role),
            ),
        &state,
        permission_names::MANAGE_ROLE,
    );

    let permission_routes = guarded(
        Router::new()
            .route("/", get(permissions::list_permissions))
            .route("/{id}", get(permissions::get_permission)),
        &state,
        permission_names::VIEW_PERMISSION,
    );

    let user_routes = guarded(
        Router::new()
            .route("/", get(users::list_users))
            .route("/{id}", get(users::get_user).put(users::update_user)),
        &state,
        permission_names::MANAGE_USER,
    );

    let authorization_routes = guarded(
        Router::new()
            .route(
                "/assign-role-to-user",
                post(authorizations::assign_role_to_user),
            )
            .route(
                "/revoke-role-from-user",
                delete(authorizations::revoke_role_from_user),
            )
            .route(
                "/assign-permission-to-user",
                post(authorizations::assign_permission_to_user),
            )
            .route(
                "/revoke-permission-from-user",
                delete(authorizations::revoke_permission_from_user),
            )
            .route(
                "/attach-permission-to-role",
                post(authorizations::attach_permission_to_role),
            )
            .route(
                "/revoke-permission-from-role",
                delete(authorizations::revoke_permission_from_role),
            ),
        &state,
        permission_names::MANAGE_AUTHORIZATION,
    );

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes.merge(auth_protected_routes))
        // Access control
        .nest("/api/v1/roles", role_routes)
        .nest("/api/v1/permissions", permission_routes)
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/authorizations", authorization_routes)
        .with_state(state)
        // Swagger UI
        .merge(swagger_routes)
        // Prometheus
        .merge(metrics_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
