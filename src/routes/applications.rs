use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::application_dto::{ApplicationDetailResponse, ApplyPayload, DecidePayload},
    error::Result,
    middleware::auth::ActingAs,
    models::application::Decision,
    utils::ids::parse_id,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/teacher/ApplicationsList",
    responses(
        (status = 200, description = "Applications to the teacher's proposals", body = [TeacherApplication]),
        (status = 401, description = "Not authenticated as a teacher")
    )
)]
#[axum::debug_handler]
pub async fn teacher_applications(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let teacher_id = actor.teacher_id()?;
    let applications = state
        .application_service
        .get_by_teacher_id(teacher_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/teacher/applicationDetail/{id}",
    params(
        ("id" = i32, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application with the applicant and their career", body = ApplicationDetailResponse),
        (status = 401, description = "Not the owner of the proposal"),
        (status = 404, description = "Application not found"),
        (status = 422, description = "Id is not a positive integer")
    )
)]
#[axum::debug_handler]
pub async fn application_detail(
    State(state): State<AppState>,
    actor: ActingAs,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id, "application id")?;
    let detail = state
        .application_service
        .get_teacher_detail(&actor, id)
        .await?;
    let career = state
        .career_service
        .get_by_student_id(detail.student_id)
        .await?;
    Ok(Json(ApplicationDetailResponse {
        status: detail.status,
        detail,
        career,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/teacher/applicationDetail/{id}",
    params(
        ("id" = i32, Path, description = "Application id")
    ),
    request_body = DecidePayload,
    responses(
        (status = 200, description = "Application accepted or rejected", body = Application),
        (status = 400, description = "Application already decided"),
        (status = 401, description = "Not the owner of the proposal"),
        (status = 404, description = "Application not found"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn decide_application(
    State(state): State<AppState>,
    actor: ActingAs,
    Path(raw_id): Path<String>,
    payload: std::result::Result<Json<DecidePayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    actor.teacher_id()?;
    let id = parse_id(&raw_id, "application id")?;
    let Json(payload) = payload?;
    let application = state
        .application_service
        .decide(&actor, id, Decision::from(payload.status))
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/student/ApplicationsList",
    responses(
        (status = 200, description = "The student's applications", body = [StudentApplication]),
        (status = 401, description = "Not authenticated as a student")
    )
)]
#[axum::debug_handler]
pub async fn student_applications(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let student_id = actor.student_id()?;
    let applications = state
        .application_service
        .get_by_student_id(student_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/student/applyProposal",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Duplicate application or proposal closed"),
        (status = 401, description = "Not authenticated as a student"),
        (status = 404, description = "Thesis proposal not found"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn apply_proposal(
    State(state): State<AppState>,
    actor: ActingAs,
    payload: std::result::Result<Json<ApplyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    actor.student_id()?;
    let Json(payload) = payload?;
    payload.validate()?;
    let application = state
        .application_service
        .apply(&actor, payload.proposal_id, payload.apply_date)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}
