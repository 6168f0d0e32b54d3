use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    dto::lookup_dto::TeacherListItem,
    error::Result,
    middleware::auth::ActingAs,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/teacher/details",
    responses(
        (status = 200, description = "Logged teacher with group and department", body = TeacherDetails),
        (status = 401, description = "Not authenticated as a teacher")
    )
)]
#[axum::debug_handler]
pub async fn teacher_details(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let teacher_id = actor.teacher_id()?;
    let details = state.teacher_service.get_details_by_id(teacher_id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    get,
    path = "/api/student/details",
    responses(
        (status = 200, description = "Logged student with degree", body = StudentDetails),
        (status = 401, description = "Not authenticated as a student")
    )
)]
#[axum::debug_handler]
pub async fn student_details(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let student_id = actor.student_id()?;
    let details = state.student_service.get_details_by_id(student_id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    get,
    path = "/api/teacher/list",
    responses((status = 200, description = "Every teacher", body = [TeacherListItem]))
)]
#[axum::debug_handler]
pub async fn list_teachers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let teachers: Vec<TeacherListItem> = state
        .teacher_service
        .get_all()
        .await?
        .into_iter()
        .map(TeacherListItem::from)
        .collect();
    Ok(Json(teachers))
}
