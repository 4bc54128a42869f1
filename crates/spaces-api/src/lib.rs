//! # spaces-api
//!
//! Browser-facing HTTP gateway built on Axum.
//!
//! Every resource route checks the session cookie, derives the backend
//! credential, forwards the call to the backend service, and relays the
//! reply (or the backend's failure) to the browser.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
