pub mod auth;
pub mod authorizations;
pub mod health;
pub mod metrics;
pub mod permissions;
pub mod request_id;
pub mod roles;
pub mod users;
