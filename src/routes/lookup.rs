use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/departments",
    responses((status = 200, description = "Departments", body = [Department]))
)]
#[axum::debug_handler]
pub async fn list_departments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.department_service.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/degrees",
    responses((status = 200, description = "Degrees", body = [Degree]))
)]
#[axum::debug_handler]
pub async fn list_degrees(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.degree_service.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses((status = 200, description = "Research groups", body = [Group]))
)]
#[axum::debug_handler]
pub async fn list_research_groups(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.group_service.get_all().await?))
}
