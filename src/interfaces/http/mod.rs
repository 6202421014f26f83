//! HTTP REST API
//!
//! - `middleware`: JWT authentication and permission gates
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, shared state and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};

#[cfg(test)]
mod tests;
