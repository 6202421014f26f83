//! Router-level feature tests against an in-memory SQLite database.

mod auth;
mod authorizations;
mod pagination;
mod permissions;
mod support;
mod users;
