//! `SessionAuth` extractor: reads the session cookie, verifies it, and
//! derives the backend credential for this request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use spaces_auth::{Credential, SessionUser};
use spaces_core::error::{AppError, ErrorKind};

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's identity plus the credential to present to the backend.
///
/// Rejects with 401 before any body is read, so unauthenticated requests
/// never reach the backend.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    /// Who is calling.
    pub user: SessionUser,
    /// Bearer credential for the backend.
    pub credential: Credential,
}

impl std::ops::Deref for SessionAuth {
    type Target = SessionUser;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

/// Decodes the session cookie, if there is a valid one.
fn session_from_parts(parts: &Parts, state: &AppState) -> Option<SessionUser> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(&state.config.session.cookie_name)?.value().to_string();

    match state.sessions.decode(&token) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(reason = %e.message, "Rejected session cookie");
            None
        }
    }
}

/// A missing identity is a 401 with the fixed message; anything else
/// (signing failures) stays an internal error.
fn credential_rejection(err: AppError) -> ApiError {
    match err.kind {
        ErrorKind::Unauthorized => AppError::unauthorized("Unauthorized").into(),
        _ => err.into(),
    }
}

impl FromRequestParts<AppState> for SessionAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(user) = session_from_parts(parts, state) else {
            return Err(AppError::unauthorized("Unauthorized").into());
        };

        let credential = state
            .credentials
            .credential(Some(&user))
            .map_err(credential_rejection)?;

        Ok(SessionAuth { user, credential })
    }
}

/// The caller's identity when signed in, `None` otherwise. Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<SessionUser>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(session_from_parts(parts, state)))
    }
}
