//! Custom Axum extractors.

pub mod auth;
pub mod body;

pub use auth::{OptionalSession, SessionAuth};
pub use body::JsonObject;
