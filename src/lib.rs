//! # authz-service
//!
//! Role and permission management backend with a configurable pagination
//! policy for every list endpoint.
//!
//! ## Architecture
//!
//! - **shared**: pagination policy, error types, shutdown signalling
//! - **config**: TOML configuration
//! - **domain**: users, roles, permissions and their repository interfaces
//! - **application**: use cases (login, role management, assignments, seeding)
//! - **infrastructure**: SeaORM persistence, password hashing, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
pub use shared::{LimitRequest, PaginationConfig, ResolvedLimit};
