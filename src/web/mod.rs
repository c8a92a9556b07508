pub mod middleware;
pub mod routes;

use std::sync::Arc;

use askama::Template;
use axum::{
    middleware as axum_middleware,
    response::Html,
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::session_store::SessionStore;
use crate::web::middleware::auth as auth_middleware;
use crate::web::routes::{attendance, auth};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
            http: reqwest::Client::new(),
        }
    }
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/", get(attendance::participant_page))
        .route("/submit", post(attendance::participant_submit))
        .route("/edit", post(attendance::participant_edit))
        .route("/admin", get(attendance::admin_page))
        .route("/admin/submit", post(attendance::admin_submit))
        .route("/admin/edit", post(attendance::admin_edit))
        .route("/signout", post(auth::signout_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        .route("/signin", get(auth::signin_page).post(auth::signin_handler))
        .route("/auth/callback", get(auth::oauth_callback))
        .merge(protected_routes)
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
