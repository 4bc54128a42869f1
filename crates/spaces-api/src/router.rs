//! Route definitions for the gateway HTTP API.
//!
//! Routes are organized by resource and mounted under `/api`, mirroring the
//! backend's own paths.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(space_routes())
        .merge(file_routes())
        .merge(member_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Session endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", get(handlers::auth::session))
        .route("/auth/signout", post(handlers::auth::sign_out))
}

/// Space CRUD and activity
fn space_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/spaces",
            get(handlers::space::list_spaces).post(handlers::space::create_space),
        )
        .route(
            "/spaces/{id}",
            get(handlers::space::get_space)
                .put(handlers::space::update_space)
                .delete(handlers::space::delete_space),
        )
        .route(
            "/spaces/{id}/activity",
            get(handlers::activity::list_activity),
        )
}

/// File listing, upload, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/spaces/{id}/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route(
            "/files/{file_id}",
            get(handlers::file::download_file).delete(handlers::file::delete_file),
        )
}

/// Membership
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/spaces/{id}/members",
            post(handlers::member::add_member),
        )
        .route(
            "/spaces/{id}/members/{email}",
            axum::routing::put(handlers::member::change_role)
                .delete(handlers::member::remove_member),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
