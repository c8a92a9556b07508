use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Local;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::{FormValues, SubmissionForm};
use crate::services::attendance_service::{
    self, AttendancePageView, AttendanceQuery, FormFlavor, PageSettings, RejectedAttempt,
};
use crate::services::submission_service::format_timestamp;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::{render, AppState};

#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendanceTemplate {
    pub page: AttendancePageView,
}

fn render_page(
    state: &AppState,
    auth_user: &AuthenticatedUser,
    flavor: FormFlavor,
    results_active: bool,
    rejected: Option<RejectedAttempt>,
) -> Result<Response, AppError> {
    let settings = PageSettings {
        user_name: &auth_user.profile.name,
        waiver_url: &state.config.waiver_url,
        capacity: state.config.capacity,
    };
    let page = state.sessions.with_session(&auth_user.session_id, |session| {
        attendance_service::build_page(
            flavor,
            session.board(flavor),
            &settings,
            results_active,
            rejected,
        )
    });

    // Signed out in another tab between the middleware check and here.
    let Some(page) = page else {
        return Ok(Redirect::to("/signin").into_response());
    };
    Ok(render(&AttendanceTemplate { page })?.into_response())
}

async fn show(
    flavor: FormFlavor,
    state: AppState,
    auth_user: AuthenticatedUser,
    query: AttendanceQuery,
) -> Result<Response, AppError> {
    render_page(&state, &auth_user, flavor, query.shows_results(), None)
}

async fn submit(
    flavor: FormFlavor,
    state: AppState,
    auth_user: AuthenticatedUser,
    form: SubmissionForm,
) -> Result<Response, AppError> {
    let values = FormValues::from(form);
    let timestamp = format_timestamp(&Local::now());
    let capacity = state.config.capacity;

    let outcome = state.sessions.with_session(&auth_user.session_id, |session| {
        session
            .board_mut(flavor)
            .submit(values.clone(), capacity, timestamp)
    });

    match outcome {
        None => Ok(Redirect::to("/signin").into_response()),
        Some(Ok(submission)) => {
            info!(
                flavor = ?flavor,
                id = submission.id,
                status = %submission.status,
                "submission recorded"
            );
            Ok(Redirect::to(flavor.base_path()).into_response())
        }
        Some(Err(errors)) => {
            warn!(flavor = ?flavor, errors = ?errors, "submission rejected");
            let response = render_page(
                &state,
                &auth_user,
                flavor,
                false,
                Some(RejectedAttempt { values, errors }),
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, response).into_response())
        }
    }
}

fn edit(flavor: FormFlavor, state: &AppState, auth_user: &AuthenticatedUser) -> Response {
    let reopened = state
        .sessions
        .with_session(&auth_user.session_id, |session| session.board_mut(flavor).edit());
    match reopened {
        None => Redirect::to("/signin").into_response(),
        Some(reopened) => {
            if !reopened {
                debug!(flavor = ?flavor, "edit ignored: nothing submitted yet");
            }
            Redirect::to(flavor.base_path()).into_response()
        }
    }
}

pub async fn participant_page(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Response, AppError> {
    show(FormFlavor::Participant, state, auth_user, query).await
}

pub async fn participant_submit(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> Result<Response, AppError> {
    submit(FormFlavor::Participant, state, auth_user, form).await
}

pub async fn participant_edit(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Response {
    edit(FormFlavor::Participant, &state, &auth_user)
}

pub async fn admin_page(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Response, AppError> {
    show(FormFlavor::Admin, state, auth_user, query).await
}

pub async fn admin_submit(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> Result<Response, AppError> {
    submit(FormFlavor::Admin, state, auth_user, form).await
}

pub async fn admin_edit(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Response {
    edit(FormFlavor::Admin, &state, &auth_user)
}
