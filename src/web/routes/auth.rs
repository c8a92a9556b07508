use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::oauth_service;
use crate::web::middleware::auth::{session_id_from_headers, AuthenticatedUser, SESSION_COOKIE};
use crate::web::{render, AppState};

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SigninTemplate {
    pub provider_label: &'static str,
}

#[derive(Debug, Deserialize, Default)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn with_cookie(mut response: Response, cookie: Cookie<'static>) -> Result<Response, AppError> {
    response
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_str(&cookie.to_string())?);
    Ok(response)
}

fn start_session(state: &AppState, profile: UserProfile) -> Result<Response, AppError> {
    info!(name = %profile.name, "sign-in: session started");
    let session_id = state.sessions.create(profile);
    with_cookie(
        Redirect::to("/").into_response(),
        session_cookie(session_id, state.config.cookie_secure),
    )
}

pub async fn signin_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let signed_in = session_id_from_headers(&headers)
        .and_then(|id| state.sessions.user(&id))
        .is_some();
    if signed_in {
        return Ok(Redirect::to("/").into_response());
    }

    let template = SigninTemplate {
        provider_label: if state.config.oauth.is_some() {
            "Sign in with Google"
        } else {
            "Continue"
        },
    };
    Ok(render(&template)?.into_response())
}

pub async fn signin_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    if let Some(oauth) = state.config.oauth.as_ref() {
        let oauth_state = state.sessions.issue_state();
        let url = oauth_service::authorize_url(oauth, &oauth_state)?;
        return Ok(Redirect::to(&url).into_response());
    }

    // Offline/local usage without a provider.
    if let Some(name) = state.config.dev_user_name.as_ref() {
        let profile = UserProfile {
            name: name.clone(),
            email: None,
        };
        return start_session(&state, profile);
    }

    Err(AppError::SignInUnavailable)
}

pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let oauth = state
        .config
        .oauth
        .as_ref()
        .ok_or(AppError::SignInUnavailable)?;

    if let Some(reason) = query.error {
        return Err(AppError::ProviderDenied(reason));
    }

    let issued = query
        .state
        .as_deref()
        .is_some_and(|s| state.sessions.take_state(s));
    if !issued {
        return Err(AppError::InvalidState);
    }

    let code = query.code.ok_or(AppError::MissingCode)?;
    let profile = oauth_service::sign_in_with_code(&state.http, oauth, &code).await?;
    start_session(&state, profile)
}

pub async fn signout_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    state.sessions.remove(&auth_user.session_id);
    info!(name = %auth_user.profile.name, "sign-out");

    let mut cookie = session_cookie(String::new(), state.config.cookie_secure);
    cookie.make_removal();
    with_cookie(Redirect::to("/signin").into_response(), cookie)
}
