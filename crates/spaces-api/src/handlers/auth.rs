//! Session inspection and sign-out.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;

use crate::extractors::OptionalSession;
use crate::state::AppState;

/// GET /api/auth/session
///
/// `{"user": {...}}` when signed in, `{}` otherwise.
pub async fn session(OptionalSession(user): OptionalSession) -> Json<serde_json::Value> {
    match user {
        Some(user) => Json(serde_json::json!({ "user": user })),
        None => Json(serde_json::json!({})),
    }
}

/// POST /api/auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
    OptionalSession(user): OptionalSession,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    if let Some(user) = user {
        tracing::info!(email = %user.email, "Signed out");
    }

    let cookie = Cookie::build(state.config.session.cookie_name.clone())
        .path("/")
        .secure(state.config.session.secure_cookie)
        .build();

    (jar.remove(cookie), Json(serde_json::json!({})))
}
