use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::models::UserProfile;
use crate::web::AppState;

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub session_id: String,
    pub profile: UserProfile,
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|hv| hv.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|c| c.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Resolves the session cookie to a signed-in user, or sends the visitor to sign in.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(session_id) = session_id_from_headers(request.headers()) {
        if let Some(profile) = state.sessions.user(&session_id) {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { session_id, profile });
            return next.run(request).await;
        }
        debug!("require_auth: unknown or expired session");
    }

    Redirect::to("/signin").into_response()
}
