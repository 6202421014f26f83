//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod permission_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod user_repository;

pub use permission_repository::SeaOrmPermissionRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use role_repository::SeaOrmRoleRepository;
pub use user_repository::SeaOrmUserRepository;

/// Unique-constraint violations differ per backend; match on the message.
fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}
