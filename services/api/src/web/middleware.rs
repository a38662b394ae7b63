//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use health_tracker_core::{PortError, SessionState};
use std::sync::Arc;

use crate::error::ApiError;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Extracts the auth session id from the `Cookie` header, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|id| !id.is_empty())
}

/// Middleware that resolves the session cookie into a `SessionState`.
///
/// If logged in, inserts the `SessionUser` into request extensions for handlers to use.
/// Otherwise returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = session_id_from_headers(req.headers()).map(str::to_string);

    let session = match session_id {
        Some(id) => match state.sessions.validate_auth_session(&id).await {
            Ok(user) => SessionState::LoggedIn(user),
            Err(PortError::Unauthorized) => SessionState::LoggedOut,
            Err(e) => return Err(e.into()),
        },
        None => SessionState::LoggedOut,
    };

    let user = session.require_user()?.clone();
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
