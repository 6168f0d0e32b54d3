use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::routes::{applications, auth, clock, health, lookup, people, proposals};

#[derive(OpenApi)]
#[openapi(
    info(title = "Thesis management API"),
    paths(
        health::health,
        auth::login,
        auth::current_session,
        proposals::list_proposals,
        proposals::get_proposal,
        proposals::filter_proposals,
        proposals::list_open_proposals,
        proposals::teacher_proposals,
        proposals::insert_proposal,
        proposals::archive_proposal,
        proposals::list_types,
        proposals::list_keywords,
        proposals::list_groups,
        applications::teacher_applications,
        applications::application_detail,
        applications::decide_application,
        applications::student_applications,
        applications::apply_proposal,
        people::teacher_details,
        people::student_details,
        people::list_teachers,
        lookup::list_departments,
        lookup::list_degrees,
        lookup::list_research_groups,
        clock::get_clock,
        clock::set_clock,
        clock::reset_clock,
    )
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
