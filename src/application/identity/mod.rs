//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, listing and profile updates.

pub mod service;

pub use service::{AuthResult, UserService};
