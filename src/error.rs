use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{0} is set but {1} is missing")]
    Incomplete(&'static str, &'static str),

    #[error("no sign-in method configured: set OAUTH_CLIENT_ID and OAUTH_CLIENT_SECRET, or DEV_USER_NAME")]
    NoSignInMethod,
}

/// Failures talking to the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("request to identity provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid provider url {0}")]
    InvalidUrl(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("sign-in with an identity provider is not configured")]
    SignInUnavailable,

    #[error("sign-in request expired or was not issued by this server")]
    InvalidState,

    #[error("identity provider did not return an authorization code")]
    MissingCode,

    #[error("sign-in was cancelled: {0}")]
    ProviderDenied(String),

    #[error(transparent)]
    OAuth(#[from] OAuthError),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SignInUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidState | AppError::MissingCode => StatusCode::BAD_REQUEST,
            AppError::ProviderDenied(_) => StatusCode::UNAUTHORIZED,
            AppError::OAuth(_) => StatusCode::BAD_GATEWAY,
            AppError::Template(_) | AppError::Header(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, "{}", self);
        } else {
            warn!(status = %status, "{}", self);
        }

        let message = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            "Something went wrong on our side. Please try again.".to_string()
        } else {
            self.to_string()
        };

        match (ErrorTemplate { message: message.clone() }).render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}
