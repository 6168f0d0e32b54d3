use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, SessionResponse, SessionUser},
    error::{Error, Result},
    middleware::auth::{issue_token, ActingAs, Role},
    utils::crypto::verify_password,
    AppState,
};

fn bad_credentials() -> Error {
    Error::Unauthenticated("Incorrect username or password".to_string())
}

/// Local login. Students are looked up first, then teachers.
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Bearer token issued", body = SessionResponse),
        (status = 401, description = "Incorrect username or password"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;

    let (actor, user) = if let Some(student) =
        state.student_service.get_by_email(&payload.username).await?
    {
        if !verify_password(&payload.password, student.password_hash.as_deref()) {
            return Err(bad_credentials());
        }
        (
            ActingAs::Student(student.id),
            SessionUser {
                id: student.id,
                role: Role::Student,
                name: student.name,
                surname: student.surname,
                email: student.email,
            },
        )
    } else if let Some(teacher) = state.teacher_service.get_by_email(&payload.username).await? {
        if !verify_password(&payload.password, teacher.password_hash.as_deref()) {
            return Err(bad_credentials());
        }
        (
            ActingAs::Teacher(teacher.id),
            SessionUser {
                id: teacher.id,
                role: Role::Teacher,
                name: teacher.name,
                surname: teacher.surname,
                email: teacher.email,
            },
        )
    } else {
        return Err(bad_credentials());
    };

    let token = issue_token(
        actor,
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )?;
    tracing::info!(?actor, "session opened");
    Ok(Json(SessionResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/api/sessions/current",
    responses(
        (status = 200, description = "Role and id carried by the token"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn current_session(actor: ActingAs) -> Result<impl IntoResponse> {
    Ok(Json(actor))
}
