//! Users module: listing, profile lookup and updates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
